// Typed request payloads
//
// Draft structs for the write endpoints, serialized under the resource
// envelope the API expects (`{"ticket": {...}}` etc.). Fields mirror
// what the API accepts; anything not modeled goes through the `extra`
// passthrough maps.

use serde::Serialize;
use serde_json::Value;

use crate::request::Params;

/// Sort direction for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Pagination and sorting for list endpoints.
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub per_page: u32,
    pub page: u32,
    pub sort_by: Option<String>,
    pub sort_order: SortOrder,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            per_page: 100,
            page: 1,
            sort_by: None,
            sort_order: SortOrder::Desc,
        }
    }
}

impl ListOptions {
    /// Query parameters for this listing. `sort_order` is only sent
    /// alongside an explicit `sort_by`.
    pub(crate) fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.insert("per_page".into(), self.per_page.into());
        params.insert("page".into(), self.page.into());
        if let Some(sort_by) = &self.sort_by {
            params.insert("sort_by".into(), sort_by.clone().into());
            params.insert("sort_order".into(), self.sort_order.as_str().into());
        }
        params
    }
}

/// A comment on a ticket or request.
#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
}

impl Comment {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            public: None,
        }
    }

    pub fn private(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            public: Some(false),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Requester {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Via {
    pub channel: String,
}

/// Payload for creating a ticket.
#[derive(Debug, Clone, Serialize)]
pub struct TicketDraft {
    pub subject: String,
    pub comment: Comment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester: Option<Requester>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub via: Option<Via>,
}

impl TicketDraft {
    pub fn new(subject: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            comment: Comment::new(description),
            requester: None,
            tags: Vec::new(),
            via: None,
        }
    }

    pub fn requester(mut self, name: Option<String>, email: impl Into<String>) -> Self {
        self.requester = Some(Requester {
            name,
            email: email.into(),
        });
        self
    }

    pub fn tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn via_channel(mut self, channel: impl Into<String>) -> Self {
        self.via = Some(Via {
            channel: channel.into(),
        });
        self
    }
}

/// Payload for creating or updating a request (end-user side of a
/// ticket). Every field is optional; updates typically carry only a
/// comment or a status.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RequestDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester_id: Option<u64>,
}

impl RequestDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn comment(mut self, comment: Comment) -> Self {
        self.comment = Some(comment);
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn requester_id(mut self, requester_id: u64) -> Self {
        self.requester_id = Some(requester_id);
        self
    }
}

/// Payload for creating a user.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// `end-user`, `agent`, or `admin`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Passthrough for fields not modeled here (e.g. `active`).
    #[serde(flatten)]
    pub extra: Params,
}

impl UserDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Payload for creating an organization.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrganizationDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Params,
}

impl OrganizationDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            extra: Params::new(),
        }
    }

    pub fn extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// One user-to-organization membership.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MembershipDraft {
    pub user_id: u64,
    pub organization_id: u64,
}

/// Scope for user listings: all users, a group's, or an organization's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserScope {
    Group(u64),
    Organization(u64),
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn ticket_draft_serializes_sparse() {
        let draft = TicketDraft::new("Printer on fire", "It is very orange.");
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({
                "subject": "Printer on fire",
                "comment": { "body": "It is very orange." },
            })
        );
    }

    #[test]
    fn ticket_draft_carries_tags_and_channel() {
        let draft = TicketDraft::new("Subject", "Body")
            .tags(["urgent", "hardware"])
            .via_channel("api");
        let value = serde_json::to_value(&draft).unwrap();

        assert_eq!(value["tags"], json!(["urgent", "hardware"]));
        assert_eq!(value["via"]["channel"], "api");
    }

    #[test]
    fn list_options_omit_sort_unless_requested() {
        let default = ListOptions::default().to_params();
        assert_eq!(default.len(), 2);
        assert_eq!(default["per_page"], json!(100));

        let sorted = ListOptions {
            sort_by: Some("created_at".into()),
            sort_order: SortOrder::Asc,
            ..ListOptions::default()
        }
        .to_params();
        assert_eq!(sorted["sort_by"], json!("created_at"));
        assert_eq!(sorted["sort_order"], json!("asc"));
    }

    #[test]
    fn user_draft_flattens_extra_fields() {
        let draft = UserDraft::new()
            .name("Roger")
            .email("roger@example.com")
            .extra("active", json!(true));
        let value = serde_json::to_value(&draft).unwrap();

        assert_eq!(value["name"], "Roger");
        assert_eq!(value["active"], json!(true));
    }
}
