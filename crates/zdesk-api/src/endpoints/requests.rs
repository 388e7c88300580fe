// Request endpoints (the end-user view of tickets)

use serde_json::Value;

use super::envelope;
use crate::client::Client;
use crate::error::Error;
use crate::request::Params;
use crate::types::{Comment, ListOptions, RequestDraft};

impl Client {
    /// List requests, paginated.
    pub async fn list_requests(&self, options: &ListOptions) -> Result<Value, Error> {
        self.get("requests", options.to_params()).await
    }

    /// Fetch a single request.
    pub async fn show_request(&self, request_id: u64) -> Result<Value, Error> {
        self.get(&format!("requests/{request_id}"), Params::new())
            .await
    }

    /// Open a request. Subject and description should be filled in;
    /// the requester id identifies who it is opened for.
    pub async fn create_request(&self, request: &RequestDraft) -> Result<Value, Error> {
        self.post("requests", envelope("request", request)?).await
    }

    /// Update a request -- mostly used to add a comment or change
    /// status.
    pub async fn update_request(
        &self,
        request_id: u64,
        request: &RequestDraft,
    ) -> Result<Value, Error> {
        self.put(&format!("requests/{request_id}"), envelope("request", request)?)
            .await
    }

    /// Add a comment to a request.
    pub async fn create_request_comment(
        &self,
        request_id: u64,
        body: &str,
    ) -> Result<Value, Error> {
        let draft = RequestDraft::new().comment(Comment::new(body));
        self.update_request(request_id, &draft).await
    }
}
