// Endpoint surface
//
// Thin typed methods over the dispatcher, one module per resource.
// These only assemble a route and params; everything else (auth, cache,
// transport, errors) lives in the dispatch pipeline.

pub(crate) mod groups;
pub(crate) mod help_center;
pub(crate) mod organizations;
pub(crate) mod requests;
pub(crate) mod search;
pub(crate) mod tickets;
pub(crate) mod users;

use serde::Serialize;

use crate::error::Error;
use crate::request::Params;

/// Join an id list into the comma-separated form the bulk endpoints
/// take. At least one id is required.
pub(crate) fn join_ids(ids: &[u64]) -> Result<String, Error> {
    if ids.is_empty() {
        return Err(Error::InvalidArgument("at least one id is required".into()));
    }
    Ok(ids
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(","))
}

/// Wrap a draft payload under its resource envelope key, e.g.
/// `{"ticket": {...}}`.
pub(crate) fn envelope(key: &str, payload: impl Serialize) -> Result<Params, Error> {
    let value = serde_json::to_value(payload)
        .map_err(|e| Error::InvalidArgument(format!("unserializable payload: {e}")))?;
    let mut params = Params::new();
    params.insert(key.to_owned(), value);
    Ok(params)
}
