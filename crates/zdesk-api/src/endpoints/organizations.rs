// Organization and membership endpoints

use serde_json::Value;

use super::{envelope, join_ids};
use crate::client::Client;
use crate::error::Error;
use crate::request::Params;
use crate::types::{MembershipDraft, OrganizationDraft};

impl Client {
    /// List organizations, or the ones a user belongs to.
    pub async fn list_organizations(
        &self,
        user_id: Option<u64>,
        page: u32,
    ) -> Result<Value, Error> {
        if let Some(user_id) = user_id {
            return self
                .get(&format!("users/{user_id}/organizations"), Params::new())
                .await;
        }

        let mut params = Params::new();
        params.insert("page".into(), page.into());
        self.get("organizations", params).await
    }

    /// Create an organization.
    pub async fn create_organization(
        &self,
        organization: &OrganizationDraft,
    ) -> Result<Value, Error> {
        self.post("organizations", envelope("organization", organization)?)
            .await
    }

    /// Delete an organization.
    pub async fn delete_organization(&self, organization_id: u64) -> Result<Value, Error> {
        self.delete(&format!("organizations/{organization_id}"), Params::new())
            .await
    }

    /// Delete several organizations in one call. Like
    /// [`bulk_delete_users`](Self::bulk_delete_users), the ids filter is
    /// part of the route's own query string.
    pub async fn bulk_delete_organizations(&self, org_ids: &[u64]) -> Result<Value, Error> {
        let route = format!("organizations/destroy_many.json?ids={}", join_ids(org_ids)?);
        self.dispatch(&route, &Params::new(), reqwest::Method::DELETE, false)
            .await
    }

    /// List organization memberships: all of them, a user's, or an
    /// organization's.
    pub async fn list_organization_memberships(
        &self,
        organization_id: Option<u64>,
        user_id: Option<u64>,
        page: u32,
    ) -> Result<Value, Error> {
        let route = match (organization_id, user_id) {
            (Some(org_id), _) => format!("organizations/{org_id}/organization_memberships"),
            (None, Some(user_id)) => format!("users/{user_id}/organization_memberships"),
            (None, None) => "organization_memberships".to_owned(),
        };

        let mut params = Params::new();
        params.insert("page".into(), page.into());
        self.get(&route, params).await
    }

    /// Create a batch of memberships in one call.
    pub async fn create_many_memberships(
        &self,
        memberships: &[MembershipDraft],
    ) -> Result<Value, Error> {
        self.post(
            "organization_memberships/create_many",
            envelope("organization_memberships", memberships)?,
        )
        .await
    }
}
