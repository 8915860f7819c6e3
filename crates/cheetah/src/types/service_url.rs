//! Base URL of the CheetahMail API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// Where requests go: `https://{host}` plus the API path.
///
/// The `host` option is usually a bare name (`foo.com`). A full URL also
/// works; it must be HTTPS unless it points at a loopback address, and it
/// cannot carry a path or query.
///
/// ```
/// use cheetah::ServiceUrl;
///
/// let url = ServiceUrl::new("foo.com").unwrap();
/// assert_eq!(url.endpoint("/api/login1"), "https://foo.com/api/login1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ServiceUrl(Url);

impl ServiceUrl {
    /// Fails with [`InvalidInputError::Host`] naming the offending value.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref().trim();
        if s.is_empty() {
            return Err(InvalidInputError::Host {
                value: s.to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        let candidate = if s.contains("://") {
            s.to_string()
        } else {
            format!("https://{}", s)
        };

        let url = Url::parse(&candidate).map_err(|e| InvalidInputError::Host {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::check(&url, s)?;

        Ok(Self(url))
    }

    /// `foo.com` + `/api/login1` gives `https://foo.com/api/login1`.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn check(url: &Url, original: &str) -> Result<(), Error> {
        match Self::rejection(url) {
            Some(reason) => Err(InvalidInputError::Host {
                value: original.to_string(),
                reason: reason.to_string(),
            }
            .into()),
            None => Ok(()),
        }
    }

    fn rejection(url: &Url) -> Option<&'static str> {
        let loopback = matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "[::1]"));

        if url.cannot_be_a_base() {
            Some("must be an absolute URL")
        } else if url.host_str().is_none_or(str::is_empty) {
            Some("must have a host")
        } else if !(url.scheme() == "https" || (url.scheme() == "http" && loopback)) {
            Some("must use HTTPS (HTTP allowed only for localhost)")
        } else if url.path() != "/" || url.query().is_some() {
            Some("must not carry a path or query")
        } else {
            None
        }
    }
}

impl fmt::Display for ServiceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ServiceUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ServiceUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ServiceUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ServiceUrl::new(&s).map_err(serde::de::Error::custom)
    }
}
