// Authentication context
//
// Single source of truth for "who is this call made as". Holds the
// permanent credential pair plus a stack of temporary identity overrides
// (impersonation / anonymous frames). The Authorization header is
// recomputed from the currently active identity on every dispatch --
// never cached on a request.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use secrecy::{ExposeSecret, SecretString};

/// A temporary substitution of the acting identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum OverrideMode {
    /// Authenticate as a different identity (same API token).
    ActAs(String),
    /// Omit the Authorization header entirely.
    NoAuth,
}

/// One outstanding override frame.
///
/// `fast_reset` frames are consumed automatically by the dispatcher after
/// the next logical call; held frames persist until an explicit
/// [`AuthContext::restore`].
#[derive(Debug, Clone)]
pub(crate) struct OverrideFrame {
    pub(crate) mode: OverrideMode,
    pub(crate) fast_reset: bool,
}

/// Credential bookkeeping for a single client instance.
///
/// Overrides form an explicit push/pop stack: beginning a second override
/// before the first resets pushes on top of it rather than silently
/// discarding the saved identity. The active identity is always the top
/// frame, falling back to the permanent credentials.
#[derive(Debug)]
pub(crate) struct AuthContext {
    identity: String,
    secret: SecretString,
    overrides: Vec<OverrideFrame>,
}

impl AuthContext {
    pub(crate) fn new(identity: impl Into<String>, secret: SecretString) -> Self {
        Self {
            identity: identity.into(),
            secret,
            overrides: Vec::new(),
        }
    }

    /// Replace the permanent credential pair.
    ///
    /// Outstanding overrides are left untouched; they resolve against the
    /// new credentials once popped.
    pub(crate) fn set_credentials(&mut self, identity: impl Into<String>, secret: SecretString) {
        self.identity = identity.into();
        self.secret = secret;
    }

    /// The permanent identity (ignores overrides).
    pub(crate) fn identity(&self) -> &str {
        &self.identity
    }

    /// Push an impersonation frame: subsequent calls authenticate as
    /// `identity` until the frame is popped.
    pub(crate) fn begin_override(&mut self, identity: impl Into<String>, fast_reset: bool) {
        self.overrides.push(OverrideFrame {
            mode: OverrideMode::ActAs(identity.into()),
            fast_reset,
        });
    }

    /// Push a no-auth frame: subsequent calls omit the Authorization
    /// header until the frame is popped.
    pub(crate) fn begin_no_auth(&mut self, fast_reset: bool) {
        self.overrides.push(OverrideFrame {
            mode: OverrideMode::NoAuth,
            fast_reset,
        });
    }

    /// Called by the dispatcher after every logical call (cache hits
    /// included). Pops the top frame iff it asked for fast reset.
    pub(crate) fn end_override_if_due(&mut self) {
        if self.overrides.last().is_some_and(|f| f.fast_reset) {
            self.overrides.pop();
        }
    }

    /// Pop one override frame unconditionally. Idempotent when none is
    /// outstanding.
    pub(crate) fn restore(&mut self) {
        self.overrides.pop();
    }

    /// Whether any override frame is outstanding.
    pub(crate) fn has_override(&self) -> bool {
        !self.overrides.is_empty()
    }

    /// Compute the Authorization header value for the currently active
    /// identity, or `None` while a no-auth frame is on top.
    ///
    /// Wire format: `Basic base64("{identity}/token:{secret}")`.
    pub(crate) fn authorization_header(&self) -> Option<String> {
        let identity = match self.overrides.last() {
            Some(OverrideFrame {
                mode: OverrideMode::NoAuth,
                ..
            }) => return None,
            Some(OverrideFrame {
                mode: OverrideMode::ActAs(identity),
                ..
            }) => identity.as_str(),
            None => self.identity.as_str(),
        };

        let pair = format!("{identity}/token:{}", self.secret.expose_secret());
        Some(format!("Basic {}", BASE64.encode(pair)))
    }
}
