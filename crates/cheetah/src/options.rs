//! Client configuration.

use std::fmt;

use regex::Regex;
use serde::Deserialize;

use crate::Result;
use crate::auth::Credentials;
use crate::error::{Error, InvalidInputError};
use crate::params::Params;
use crate::types::ServiceUrl;

/// Configuration accepted by [`Session`](crate::Session) and
/// [`Mailer`](crate::Mailer).
///
/// Every field is optional when deserializing; [`Options::validate`]
/// reports the required ones that are missing.
///
/// # Example
///
/// ```
/// use cheetah::Options;
///
/// let options = Options::new("foo.com", "foo_user", "foo", "123").with_disable_tracking(true);
/// assert!(options.tracking_disabled());
/// assert_eq!(options.default_params().to_form_body(), "aid=123&test=1");
/// ```
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Service host (`foo.com`) or base URL.
    pub host: String,
    pub username: String,
    pub password: String,
    /// Account id, sent as `aid` on every request.
    pub aid: String,
    /// Verify the server's TLS certificate.
    pub verify_peer: bool,
    /// Send `test=1` with every request so the service does not track it.
    pub disable_tracking: bool,
    /// Legacy form of the tracking switch; `Some(false)` disables tracking.
    pub enable_tracking: Option<bool>,
    /// Only recipients whose address matches this pattern are mailed.
    pub whitelist_filter: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            host: String::new(),
            username: String::new(),
            password: String::new(),
            aid: String::new(),
            verify_peer: true,
            disable_tracking: false,
            enable_tracking: None,
            whitelist_filter: None,
        }
    }
}

impl Options {
    /// Create options with the four required values and defaults for the rest.
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        aid: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: password.into(),
            aid: aid.into(),
            ..Self::default()
        }
    }

    /// Parse options from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            Error::from(InvalidInputError::Options {
                reason: e.to_string(),
            })
        })
    }

    pub fn with_verify_peer(mut self, verify_peer: bool) -> Self {
        self.verify_peer = verify_peer;
        self
    }

    pub fn with_disable_tracking(mut self, disable_tracking: bool) -> Self {
        self.disable_tracking = disable_tracking;
        self
    }

    pub fn with_enable_tracking(mut self, enable_tracking: bool) -> Self {
        self.enable_tracking = Some(enable_tracking);
        self
    }

    pub fn with_whitelist_filter(mut self, pattern: impl Into<String>) -> Self {
        self.whitelist_filter = Some(pattern.into());
        self
    }

    /// Check required values and parse the host and whitelist pattern.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("host", &self.host),
            ("username", &self.username),
            ("password", &self.password),
            ("aid", &self.aid),
        ] {
            if value.trim().is_empty() {
                return Err(InvalidInputError::MissingOption { name }.into());
            }
        }
        self.service_url()?;
        self.whitelist()?;
        Ok(())
    }

    /// True when either tracking switch asks for `test=1`.
    pub fn tracking_disabled(&self) -> bool {
        self.disable_tracking || self.enable_tracking == Some(false)
    }

    /// Parameters merged into every request.
    pub fn default_params(&self) -> Params {
        let mut params = Params::new().with("aid", self.aid.as_str());
        if self.tracking_disabled() {
            params.insert("test", "1");
        }
        params
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password)
    }

    pub fn service_url(&self) -> Result<ServiceUrl> {
        ServiceUrl::new(&self.host)
    }

    /// Compiled whitelist filter, if one is configured.
    pub fn whitelist(&self) -> Result<Option<Regex>> {
        self.whitelist_filter
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| {
                    Error::from(InvalidInputError::WhitelistFilter {
                        value: pattern.to_string(),
                        reason: e.to_string(),
                    })
                })
            })
            .transpose()
    }
}

// Intentionally hide password in Debug output
impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("aid", &self.aid)
            .field("verify_peer", &self.verify_peer)
            .field("disable_tracking", &self.disable_tracking)
            .field("enable_tracking", &self.enable_tracking)
            .field("whitelist_filter", &self.whitelist_filter)
            .finish()
    }
}
