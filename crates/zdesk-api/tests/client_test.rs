#![allow(clippy::unwrap_used)]
// Integration tests for the dispatch pipeline using wiremock: caching,
// identity overrides, and error propagation.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zdesk_api::types::{ListOptions, TicketDraft};
use zdesk_api::{Client, ClientBuilder, Error};

// ── Helpers ─────────────────────────────────────────────────────────

fn basic_header(identity: &str) -> String {
    format!("Basic {}", BASE64.encode(format!("{identity}/token:s3cret")))
}

fn builder_for(server: &MockServer) -> ClientBuilder {
    Client::builder()
        .base_url(Url::parse(&server.uri()).unwrap())
        .credentials("agent@example.com", "s3cret".to_string().into())
}

async fn setup() -> (MockServer, Client) {
    let server = MockServer::start().await;
    let client = builder_for(&server).build().unwrap();
    (server, client)
}

fn ticket_page() -> serde_json::Value {
    json!({ "tickets": [{ "id": 35436, "subject": "Help!" }], "count": 1 })
}

// ── Caching ─────────────────────────────────────────────────────────

#[tokio::test]
async fn cache_hit_avoids_transport() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/tickets.json"))
        .and(query_param("per_page", "100"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ticket_page()))
        .expect(1)
        .mount(&server)
        .await;

    let first = client.list_tickets(&ListOptions::default()).await.unwrap();
    let second = client.list_tickets(&ListOptions::default()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first["tickets"][0]["id"], 35436);
}

#[tokio::test]
async fn cache_misses_after_ttl() {
    let server = MockServer::start().await;
    let client = builder_for(&server)
        .cache_ttl(Duration::ZERO)
        .build()
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/tickets.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ticket_page()))
        .expect(2)
        .mount(&server)
        .await;

    client.list_tickets(&ListOptions::default()).await.unwrap();
    client.list_tickets(&ListOptions::default()).await.unwrap();
}

#[tokio::test]
async fn non_get_is_never_cached() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/tickets.json"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "ticket": { "id": 1 } })),
        )
        .expect(2)
        .mount(&server)
        .await;

    let draft = TicketDraft::new("Subject", "Body");
    client.create_ticket(&draft).await.unwrap();
    client.create_ticket(&draft).await.unwrap();
}

#[tokio::test]
async fn debug_bypass_disables_caching() {
    let server = MockServer::start().await;
    let client = builder_for(&server)
        .disable_cache()
        .build()
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/tickets.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ticket_page()))
        .expect(2)
        .mount(&server)
        .await;

    client.list_tickets(&ListOptions::default()).await.unwrap();
    client.list_tickets(&ListOptions::default()).await.unwrap();
}

#[tokio::test]
async fn clear_cache_reports_count_and_forces_refetch() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/tickets.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ticket_page()))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/groups.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "groups": [] })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/7.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": {} })))
        .mount(&server)
        .await;

    client.list_tickets(&ListOptions::default()).await.unwrap();
    client.list_groups().await.unwrap();
    client.show_user(7).await.unwrap();

    assert_eq!(client.clear_cache().unwrap(), 3);

    // Previously cached entry is gone; the transport is hit again.
    client.list_tickets(&ListOptions::default()).await.unwrap();
}

// ── Identity overrides ──────────────────────────────────────────────

#[tokio::test]
async fn fast_reset_override_lasts_one_call() {
    let server = MockServer::start().await;
    let client = builder_for(&server)
        .disable_cache()
        .build()
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/tickets/1.json"))
        .and(header("authorization", basic_header("alice@example.com")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ticket": {} })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tickets/1.json"))
        .and(header("authorization", basic_header("agent@example.com")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ticket": {} })))
        .expect(1)
        .mount(&server)
        .await;

    client.act_as("alice@example.com");
    client.show_ticket(1).await.unwrap();
    client.show_ticket(1).await.unwrap();
}

#[tokio::test]
async fn held_override_persists_until_restore() {
    let server = MockServer::start().await;
    let client = builder_for(&server)
        .disable_cache()
        .build()
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/tickets/1.json"))
        .and(header("authorization", basic_header("alice@example.com")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ticket": {} })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tickets/1.json"))
        .and(header("authorization", basic_header("agent@example.com")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ticket": {} })))
        .expect(1)
        .mount(&server)
        .await;

    client.act_as_held("alice@example.com");
    client.show_ticket(1).await.unwrap();
    client.show_ticket(1).await.unwrap();

    client.restore_identity();
    client.show_ticket(1).await.unwrap();
}

#[tokio::test]
async fn anonymous_call_omits_authorization() {
    let server = MockServer::start().await;
    let client = builder_for(&server)
        .disable_cache()
        .build()
        .unwrap();

    // wiremock has no "header absent" matcher; assert on the received
    // request instead.
    Mock::given(method("GET"))
        .and(path("/help_center/en-us/categories.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "categories": [] })))
        .expect(1)
        .mount(&server)
        .await;

    client.anonymous();
    client.list_categories("en-us").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn cache_hit_still_consumes_fast_override() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/groups.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "groups": [] })))
        .expect(1)
        .mount(&server)
        .await;
    // After the cache-hit call, the override must already be consumed.
    Mock::given(method("GET"))
        .and(path("/tickets/1.json"))
        .and(header("authorization", basic_header("agent@example.com")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ticket": {} })))
        .expect(1)
        .mount(&server)
        .await;

    client.list_groups().await.unwrap();

    client.act_as("alice@example.com");
    client.list_groups().await.unwrap(); // served from cache
    client.show_ticket(1).await.unwrap();
}

// ── Error propagation ───────────────────────────────────────────────

#[tokio::test]
async fn non_2xx_surfaces_api_error_and_resets_override() {
    let server = MockServer::start().await;
    let client = builder_for(&server)
        .disable_cache()
        .build()
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/tickets/404.json"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "RecordNotFound" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tickets/1.json"))
        .and(header("authorization", basic_header("agent@example.com")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ticket": {} })))
        .expect(1)
        .mount(&server)
        .await;

    client.act_as("alice@example.com");
    let result = client.show_ticket(404).await;

    match result {
        Err(Error::Api { status, ref body }) => {
            assert_eq!(status, 404);
            assert!(body.contains("RecordNotFound"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
    assert!(result.as_ref().err().unwrap().is_not_found());

    // The failed call consumed the override.
    client.show_ticket(1).await.unwrap();
}

#[tokio::test]
async fn undecodable_body_is_a_decode_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/groups.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let result = client.list_groups().await;

    match result {
        Err(Error::Deserialization { ref body, .. }) => {
            assert!(body.contains("gateway"));
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn empty_id_list_fails_before_transport() {
    let (server, client) = setup().await;

    let result = client.show_tickets(&[]).await;
    assert!(matches!(result, Err(Error::InvalidArgument(_))));

    // No request reached the server.
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── Endpoint shape ──────────────────────────────────────────────────

#[tokio::test]
async fn bulk_delete_builds_ids_query_without_double_suffix() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/users/destroy_many.json"))
        .and(query_param("ids", "1,2,3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "job_status": {} })))
        .expect(1)
        .mount(&server)
        .await;

    client.bulk_delete_users(&[1, 2, 3]).await.unwrap();
}

#[tokio::test]
async fn search_sends_query_string() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("query", "type:ticket requester:end@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .tickets_by_requester_email("end@example.com")
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_with_empty_body_decodes_as_null() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/tickets/9.json"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let value = client.delete_ticket(9).await.unwrap();
    assert!(value.is_null());
}
