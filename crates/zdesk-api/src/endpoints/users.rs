// User endpoints

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use super::{envelope, join_ids};
use crate::client::Client;
use crate::error::Error;
use crate::request::Params;
use crate::types::{UserDraft, UserScope};

impl Client {
    /// List users, optionally scoped to a group or organization.
    pub async fn list_users(
        &self,
        scope: Option<UserScope>,
        page: Option<u32>,
    ) -> Result<Value, Error> {
        let mut params = Params::new();
        if let Some(page) = page {
            params.insert("page".into(), page.into());
        }

        let route = match scope {
            Some(UserScope::Group(group_id)) => format!("groups/{group_id}/users"),
            Some(UserScope::Organization(org_id)) => format!("organizations/{org_id}/users"),
            None => "users".to_owned(),
        };
        self.get(&route, params).await
    }

    /// Fetch a single user.
    pub async fn show_user(&self, user_id: u64) -> Result<Value, Error> {
        self.get(&format!("users/{user_id}"), Params::new()).await
    }

    /// Fetch several users in one call.
    pub async fn show_users(&self, user_ids: &[u64]) -> Result<Value, Error> {
        let mut params = Params::new();
        params.insert("ids".into(), join_ids(user_ids)?.into());
        self.get("users/show_many", params).await
    }

    /// Related-information counts for a user (assigned/requested
    /// tickets, etc.).
    pub async fn user_related_info(&self, user_id: u64) -> Result<Value, Error> {
        self.get(&format!("users/{user_id}/related"), Params::new())
            .await
    }

    /// Create a user.
    pub async fn create_user(&self, user: &UserDraft) -> Result<Value, Error> {
        self.post("users", envelope("user", user)?).await
    }

    /// Delete a user.
    pub async fn delete_user(&self, user_id: u64) -> Result<Value, Error> {
        self.delete(&format!("users/{user_id}"), Params::new())
            .await
    }

    /// Delete several users in one call.
    ///
    /// The ids filter travels in the query string even though this is a
    /// DELETE, so the route carries its own suffix and query.
    pub async fn bulk_delete_users(&self, user_ids: &[u64]) -> Result<Value, Error> {
        let route = format!("users/destroy_many.json?ids={}", join_ids(user_ids)?);
        self.dispatch(&route, &Params::new(), reqwest::Method::DELETE, false)
            .await
    }

    /// Set a user's password.
    pub async fn set_user_password(
        &self,
        user_id: u64,
        password: &SecretString,
    ) -> Result<Value, Error> {
        let mut params = Params::new();
        params.insert("password".into(), password.expose_secret().into());
        self.post(&format!("users/{user_id}/password"), params).await
    }

    /// Groups the user belongs to.
    pub async fn user_groups(&self, user_id: u64) -> Result<Value, Error> {
        self.get(&format!("users/{user_id}/groups"), Params::new())
            .await
    }

    /// The user's identities (emails, phone numbers, ...).
    pub async fn list_identities(&self, user_id: u64) -> Result<Value, Error> {
        self.get(&format!("users/{user_id}/identities"), Params::new())
            .await
    }
}
