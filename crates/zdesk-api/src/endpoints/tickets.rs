// Ticket endpoints

use serde_json::Value;

use super::{envelope, join_ids};
use crate::client::Client;
use crate::error::Error;
use crate::request::Params;
use crate::types::{Comment, ListOptions, TicketDraft};

impl Client {
    /// List tickets, paginated.
    pub async fn list_tickets(&self, options: &ListOptions) -> Result<Value, Error> {
        self.get("tickets", options.to_params()).await
    }

    /// Fetch a single ticket.
    pub async fn show_ticket(&self, ticket_id: u64) -> Result<Value, Error> {
        self.get(&format!("tickets/{ticket_id}"), Params::new())
            .await
    }

    /// Fetch several tickets in one call.
    pub async fn show_tickets(&self, ticket_ids: &[u64]) -> Result<Value, Error> {
        let mut params = Params::new();
        params.insert("ids".into(), join_ids(ticket_ids)?.into());
        self.get("tickets/show_many", params).await
    }

    /// Create a ticket.
    pub async fn create_ticket(&self, ticket: &TicketDraft) -> Result<Value, Error> {
        self.post("tickets", envelope("ticket", ticket)?).await
    }

    /// Create a batch of tickets in one call.
    pub async fn create_many_tickets(&self, tickets: &[TicketDraft]) -> Result<Value, Error> {
        self.post("tickets/create_many", envelope("tickets", tickets)?)
            .await
    }

    /// Update a ticket. `changes` is the partial `ticket` object to
    /// apply; every property is optional server-side.
    pub async fn update_ticket(&self, ticket_id: u64, changes: Value) -> Result<Value, Error> {
        let mut params = Params::new();
        params.insert("ticket".into(), changes);
        self.put(&format!("tickets/{ticket_id}"), params).await
    }

    /// Delete a ticket.
    pub async fn delete_ticket(&self, ticket_id: u64) -> Result<Value, Error> {
        self.delete(&format!("tickets/{ticket_id}"), Params::new())
            .await
    }

    /// Add a comment to a ticket (an update carrying only a comment).
    pub async fn create_ticket_comment(
        &self,
        ticket_id: u64,
        body: &str,
        public: bool,
    ) -> Result<Value, Error> {
        let comment = Comment {
            body: body.to_owned(),
            public: Some(public),
        };
        self.put(
            &format!("tickets/{ticket_id}"),
            envelope("ticket", serde_json::json!({ "comment": comment }))?,
        )
        .await
    }

    /// All comments on a ticket.
    pub async fn list_ticket_comments(&self, ticket_id: u64) -> Result<Value, Error> {
        self.get(&format!("tickets/{ticket_id}/comments"), Params::new())
            .await
    }

    // ── Per-user ticket views ────────────────────────────────────────

    /// Tickets the given user requested.
    pub async fn tickets_requested_by(&self, user_id: u64) -> Result<Value, Error> {
        self.get(&format!("users/{user_id}/tickets/requested"), Params::new())
            .await
    }

    /// Tickets the given user is CC'd on.
    pub async fn tickets_ccd_to(&self, user_id: u64) -> Result<Value, Error> {
        self.get(&format!("users/{user_id}/tickets/ccd"), Params::new())
            .await
    }

    /// Tickets assigned to the given user.
    pub async fn tickets_assigned_to(&self, user_id: u64) -> Result<Value, Error> {
        self.get(&format!("users/{user_id}/tickets/assigned"), Params::new())
            .await
    }
}
