//! HTTP transport used by the session.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderValue};
use tracing::{debug, instrument, trace};

use crate::error::TransportError;

use super::headers::Headers;

/// Connect timeout applied to every POST.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// A form POST ready to be sent.
#[derive(Clone, PartialEq, Eq)]
pub struct PostRequest {
    /// Absolute URL.
    pub url: String,
    /// Session cookie to attach; `None` sends no `Cookie` header.
    pub cookie: Option<String>,
    /// Form-encoded body.
    pub body: String,
}

// Hide cookie value and body (which may hold the password) in Debug output
impl std::fmt::Debug for PostRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostRequest")
            .field("url", &self.url)
            .field("cookie", &self.cookie.as_ref().map(|_| "[REDACTED]"))
            .field("body_len", &self.body.len())
            .finish()
    }
}

/// What came back from the server, before any classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
    pub headers: Headers,
}

impl RawResponse {
    /// Build a response from a raw `HTTP/1.1 ...` header block, for
    /// transports that hand back unparsed headers.
    pub fn from_header_block(status: u16, header_block: &str, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            headers: Headers::parse_block(header_block),
        }
    }
}

/// A transport capable of performing a single form POST.
///
/// The session never inspects transport internals. Any implementation
/// that returns the status, body text, and headers of the response can
/// stand in for the network.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, request: PostRequest) -> Result<RawResponse, TransportError>;
}

/// Production transport over `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport.
    ///
    /// `verify_peer` controls TLS certificate verification. Idle
    /// connections are not kept between calls.
    pub fn new(verify_peer: bool) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("cheetah/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            .pool_max_idle_per_host(0)
            .danger_accept_invalid_certs(!verify_peer)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn post(&self, request: PostRequest) -> Result<RawResponse, TransportError> {
        debug!("POST");

        let mut builder = self
            .client
            .post(&request.url)
            .header(
                CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded"),
            )
            .body(request.body);

        if let Some(cookie) = request.cookie {
            let value = HeaderValue::from_str(&cookie).map_err(|_| TransportError::Http {
                message: "session cookie contains characters not allowed in a header".to_string(),
            })?;
            builder = builder.header(COOKIE, value);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = Headers::from(response.headers());
        let body = response.text().await?;

        trace!(status, body_len = body.len(), "response received");

        Ok(RawResponse {
            status,
            body,
            headers,
        })
    }
}
