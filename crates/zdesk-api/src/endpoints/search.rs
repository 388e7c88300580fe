// Search endpoints
//
// The unified search endpoint plus the common canned queries built on
// top of it. Query strings use the API's `type:... field:value` syntax.

use serde_json::Value;

use crate::client::Client;
use crate::error::Error;
use crate::request::Params;

impl Client {
    /// Run a raw search query.
    pub async fn search(&self, query: &str) -> Result<Value, Error> {
        let mut params = Params::new();
        params.insert("query".into(), query.into());
        self.get("search", params).await
    }

    /// All tickets requested by the given email address.
    pub async fn tickets_by_requester_email(&self, email: &str) -> Result<Value, Error> {
        self.search(&format!("type:ticket requester:{email}")).await
    }

    /// Look up a user by email.
    pub async fn user_by_email(&self, email: &str) -> Result<Value, Error> {
        let mut params = Params::new();
        params.insert("query".into(), email.into());
        self.get("users/search", params).await
    }

    /// All requests (any status) opened by the given email address.
    pub async fn requests_by_email(&self, email: &str) -> Result<Value, Error> {
        self.search(&format!("type:request requester:{email} status:all"))
            .await
    }

    /// Organizations matching a name.
    pub async fn organizations_by_name(&self, name: &str) -> Result<Value, Error> {
        self.search(&format!("type:organization {name}")).await
    }
}
