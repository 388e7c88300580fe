// Request construction
//
// Turns a logical call (route + params + verb) into a transport-ready
// descriptor. Pure assembly: no I/O happens here, and a malformed route
// simply produces a request the server will reject.

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use url::Url;

use crate::error::Error;

/// Ordered parameter mapping for a single call.
///
/// Backed by `serde_json::Map`, which keeps keys in canonical (sorted)
/// order -- two maps with the same content serialize identically no
/// matter the insertion order, which is what the cache fingerprint
/// relies on.
pub type Params = serde_json::Map<String, Value>;

/// A fully-formed request descriptor. Immutable once built; constructed
/// fresh for every call so the Authorization header always reflects the
/// identity active at build time.
#[derive(Debug)]
pub(crate) struct RequestSpec {
    pub(crate) method: Method,
    pub(crate) url: Url,
    pub(crate) body: Option<Value>,
    pub(crate) headers: HeaderMap,
}

impl RequestSpec {
    /// Assemble a request against `base` (the API root, no trailing
    /// slash).
    ///
    /// `append_suffix` appends the canonical `.json` suffix that selects
    /// the response serialization format server-side; endpoints that bake
    /// their own query string into `route` pass `false`.
    ///
    /// GET params become the query string; for every other verb they are
    /// serialized as the JSON body and no query string is added.
    pub(crate) fn build(
        base: &Url,
        route: &str,
        params: &Params,
        method: Method,
        append_suffix: bool,
        authorization: Option<&str>,
    ) -> Result<Self, Error> {
        let suffix = if append_suffix { ".json" } else { "" };
        // Url normalizes host-only roots to a trailing slash; trim it so
        // the join never doubles up.
        let root = base.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{root}/{route}{suffix}"))?;

        let body = if method == Method::GET {
            if !params.is_empty() {
                let mut pairs = url.query_pairs_mut();
                for (key, value) in params {
                    pairs.append_pair(key, &render_scalar(value));
                }
            }
            None
        } else if params.is_empty() {
            None
        } else {
            Some(Value::Object(params.clone()))
        };

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(auth) = authorization {
            let mut value = HeaderValue::from_str(auth).map_err(|e| {
                Error::InvalidArgument(format!("authorization header value: {e}"))
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(Self {
            method,
            url,
            body,
            headers,
        })
    }
}

/// Render a JSON value as a query-string scalar: strings unquoted,
/// everything else in its JSON form.
fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
