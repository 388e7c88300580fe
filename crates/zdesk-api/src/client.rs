// API client and dispatch pipeline
//
// Every endpoint method funnels through `dispatch`: consult the cache
// (GET only), build a request with the currently active identity, hit
// the transport, store the result, then settle any fast-reset identity
// override. Override settling runs on every logical call -- cache hits
// and failed calls included -- so a client can never be left
// impersonating another identity.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use reqwest::Method;
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::auth::AuthContext;
use crate::cache::{CacheStore, DEFAULT_TTL, MemoryStore, ResponseCache};
use crate::error::Error;
use crate::request::{Params, RequestSpec};
use crate::transport::TransportConfig;

/// Async client for a Zendesk-style help desk API.
///
/// One instance holds one credential pair; identity overrides
/// ([`act_as`](Self::act_as), [`anonymous`](Self::anonymous)) are scoped
/// to the instance. The auth context is mutex-protected so shared use
/// across tasks is memory-safe, but interleaving an override with
/// concurrent dispatches on the *same* instance is a caller-serialization
/// concern -- use one client per logical actor when impersonating
/// concurrently.
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    auth: Mutex<AuthContext>,
    cache: ResponseCache,
}

impl Client {
    /// Start building a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Convenience constructor for the common case: account subdomain
    /// plus agent credentials, in-memory cache with the default TTL.
    pub fn new(
        subdomain: &str,
        identity: impl Into<String>,
        secret: SecretString,
    ) -> Result<Self, Error> {
        Self::builder()
            .subdomain(subdomain)
            .credentials(identity, secret)
            .build()
    }

    /// The API root this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn auth(&self) -> MutexGuard<'_, AuthContext> {
        self.auth.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Identity management ──────────────────────────────────────────

    /// The permanent identity calls are made as (ignores overrides).
    pub fn identity(&self) -> String {
        self.auth().identity().to_owned()
    }

    /// Replace the permanent credential pair. Outstanding overrides are
    /// unaffected and resolve against the new pair once popped.
    pub fn set_credentials(&self, identity: impl Into<String>, secret: SecretString) {
        self.auth().set_credentials(identity, secret);
    }

    /// Make the next call as `identity`; the override pops automatically
    /// once that call completes (successfully or not).
    pub fn act_as(&self, identity: impl Into<String>) {
        self.auth().begin_override(identity, true);
    }

    /// Make all subsequent calls as `identity` until
    /// [`restore_identity`](Self::restore_identity).
    pub fn act_as_held(&self, identity: impl Into<String>) {
        self.auth().begin_override(identity, false);
    }

    /// Send the next call without an Authorization header.
    pub fn anonymous(&self) {
        self.auth().begin_no_auth(true);
    }

    /// Send all subsequent calls unauthenticated until
    /// [`restore_identity`](Self::restore_identity).
    pub fn anonymous_held(&self) {
        self.auth().begin_no_auth(false);
    }

    /// Pop one identity override. Idempotent when none is outstanding.
    pub fn restore_identity(&self) {
        self.auth().restore();
    }

    // ── Cache maintenance ────────────────────────────────────────────

    /// Remove every cached response under this client's namespace,
    /// reporting how many entries were removed.
    pub fn clear_cache(&self) -> Result<u64, Error> {
        Ok(self.cache.invalidate_all()?)
    }

    // ── Dispatch pipeline ────────────────────────────────────────────

    /// The single choke point every endpoint method calls through.
    pub(crate) async fn dispatch<T: DeserializeOwned>(
        &self,
        route: &str,
        params: &Params,
        method: Method,
        append_suffix: bool,
    ) -> Result<T, Error> {
        let cache_key = (method == Method::GET && !self.cache.bypassed())
            .then(|| self.cache.key(route, append_suffix, params));

        if let Some(key) = &cache_key {
            if let Some(body) = self.cache.lookup(key) {
                debug!("cache hit: {route}");
                // A cache hit still consumes one logical call.
                self.auth().end_override_if_due();
                return decode(&body);
            }
        }

        let spec = RequestSpec::build(
            &self.base_url,
            route,
            params,
            method,
            append_suffix,
            self.auth().authorization_header().as_deref(),
        );

        let outcome = match spec {
            Ok(spec) => self.send(spec).await,
            Err(e) => Err(e),
        };

        // Settle fast-reset overrides before error propagation: a failed
        // call must not leave the client impersonating.
        self.auth().end_override_if_due();

        let body = outcome?;
        if let Some(key) = &cache_key {
            self.cache.store(key, body.clone());
        }
        decode(&body)
    }

    async fn send(&self, spec: RequestSpec) -> Result<String, Error> {
        debug!("{} {}", spec.method, spec.url);

        let mut request = self
            .http
            .request(spec.method, spec.url)
            .headers(spec.headers);
        if let Some(body) = &spec.body {
            request = request.json(body);
        }

        let resp = request.send().await.map_err(Error::Transport)?;
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(Error::Api {
                status: status.as_u16(),
                body,
            })
        }
    }

    // ── Verb helpers for endpoint modules ────────────────────────────

    pub(crate) async fn get(&self, route: &str, params: Params) -> Result<Value, Error> {
        self.dispatch(route, &params, Method::GET, true).await
    }

    pub(crate) async fn post(&self, route: &str, params: Params) -> Result<Value, Error> {
        self.dispatch(route, &params, Method::POST, true).await
    }

    pub(crate) async fn put(&self, route: &str, params: Params) -> Result<Value, Error> {
        self.dispatch(route, &params, Method::PUT, true).await
    }

    pub(crate) async fn delete(&self, route: &str, params: Params) -> Result<Value, Error> {
        self.dispatch(route, &params, Method::DELETE, true).await
    }
}

/// Decode a response body, treating an empty body (204s and friends) as
/// JSON `null`.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    let effective = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(effective).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: body.to_owned(),
    })
}

/// Builder for [`Client`].
pub struct ClientBuilder {
    base_url: Option<Url>,
    subdomain: Option<String>,
    identity: Option<String>,
    secret: Option<SecretString>,
    store: Option<Arc<dyn CacheStore>>,
    ttl: Duration,
    cache_bypass: bool,
    transport: TransportConfig,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            subdomain: None,
            identity: None,
            secret: None,
            store: None,
            ttl: DEFAULT_TTL,
            cache_bypass: false,
            transport: TransportConfig::default(),
        }
    }
}

impl ClientBuilder {
    /// Target `https://{subdomain}.zendesk.com/api/v2`.
    pub fn subdomain(mut self, subdomain: &str) -> Self {
        self.subdomain = Some(subdomain.to_owned());
        self
    }

    /// Target an explicit API root instead of a subdomain (mock servers,
    /// self-hosted installs).
    pub fn base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// The credential pair: identity (agent email) and API token.
    pub fn credentials(mut self, identity: impl Into<String>, secret: SecretString) -> Self {
        self.identity = Some(identity.into());
        self.secret = Some(secret);
        self
    }

    /// Back the response cache with a custom store.
    pub fn cache_store(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Override the flat TTL applied to cacheable calls.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Debug switch: disable caching for the life of the client.
    pub fn disable_cache(mut self) -> Self {
        self.cache_bypass = true;
        self
    }

    /// Custom transport settings (timeout, user agent).
    pub fn transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    pub fn build(self) -> Result<Client, Error> {
        let base_url = match (self.base_url, self.subdomain) {
            (Some(url), _) => url,
            (None, Some(subdomain)) => {
                Url::parse(&format!("https://{subdomain}.zendesk.com/api/v2"))?
            }
            (None, None) => {
                return Err(Error::InvalidArgument(
                    "either a subdomain or a base URL is required".into(),
                ));
            }
        };

        let (Some(identity), Some(secret)) = (self.identity, self.secret) else {
            return Err(Error::InvalidArgument("credentials are required".into()));
        };

        let namespace = format!("zd:{}", base_url.authority());
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()));

        Ok(Client {
            http: self.transport.build_client()?,
            base_url,
            auth: Mutex::new(AuthContext::new(identity, secret)),
            cache: ResponseCache::new(store, namespace, self.ttl, self.cache_bypass),
        })
    }
}
