// zdesk-api: Async Rust client for Zendesk-style help desk APIs.
//
// Every endpoint method funnels through one dispatch pipeline:
// auth-context resolution (with temporary identity overrides), request
// construction, and a time-bounded response cache for GET calls.

mod auth;
pub mod cache;
mod client;
mod endpoints;
pub mod error;
mod request;
pub mod transport;
pub mod types;

pub use cache::{CacheStore, DEFAULT_TTL, MemoryStore};
pub use client::{Client, ClientBuilder};
pub use error::{CacheError, Error};
pub use request::Params;
pub use transport::TransportConfig;
