// Group endpoints

use serde_json::Value;

use crate::client::Client;
use crate::error::Error;
use crate::request::Params;

impl Client {
    /// List all groups.
    pub async fn list_groups(&self) -> Result<Value, Error> {
        self.get("groups", Params::new()).await
    }

    /// Fetch a single group.
    pub async fn show_group(&self, group_id: u64) -> Result<Value, Error> {
        self.get(&format!("groups/{group_id}"), Params::new())
            .await
    }
}
