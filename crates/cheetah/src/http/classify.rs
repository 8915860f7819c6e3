//! Response classification.

use crate::error::Error;

/// Outcome of a single POST as judged by the service's conventions.
///
/// Failures carry a diagnostic message naming the request and the
/// offending status or body. The message is for humans only; control
/// flow branches on the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Success,
    Auth(String),
    Temporary(String),
    Permanent(String),
}

impl Classification {
    pub fn is_success(&self) -> bool {
        matches!(self, Classification::Success)
    }

    /// Convert into the caller-facing result.
    pub fn into_result(self) -> Result<(), Error> {
        match self {
            Classification::Success => Ok(()),
            Classification::Auth(message) => Err(Error::Auth(message)),
            Classification::Temporary(message) => Err(Error::Temporary(message)),
            Classification::Permanent(message) => Err(Error::Permanent(message)),
        }
    }
}

/// Classify a response by status code, then by body prefix.
///
/// `request` is the `path?query` description used in failure messages.
pub fn classify(request: &str, status: u16, body: &str) -> Classification {
    if (500..600).contains(&status) {
        return Classification::Temporary(http_failure(request, status));
    }
    if !(200..300).contains(&status) {
        return Classification::Permanent(http_failure(request, status));
    }

    if body.starts_with("err:auth") {
        Classification::Auth(body_failure(request, body))
    } else if body.starts_with("err:internal error") {
        Classification::Temporary(body_failure(request, body))
    } else if body.starts_with("err") {
        Classification::Permanent(body_failure(request, body))
    } else {
        Classification::Success
    }
}

fn http_failure(request: &str, status: u16) -> String {
    format!("failure:'{}', HTTP error: {}", request, status)
}

fn body_failure(request: &str, body: &str) -> String {
    format!("failure:'{}', Cheetah error: {}", request, body.trim())
}
