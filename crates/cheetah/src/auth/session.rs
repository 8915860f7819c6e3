//! Session management for authenticated CheetahMail requests.

use std::sync::Arc;

use reqwest::header::HeaderValue;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::Result;
use crate::error::Error;
use crate::http::{Classification, Headers, HttpTransport, PostRequest, Transport, classify};
use crate::options::Options;
use crate::params::Params;
use crate::types::ServiceUrl;

use super::cookie::SessionCookie;
use super::credentials::Credentials;

/// Path of the login endpoint.
pub const LOGIN_PATH: &str = "/api/login1";

/// A session with the CheetahMail API.
///
/// The session logs in lazily on the first request and attaches the
/// resulting cookie to everything it sends. When the service rejects the
/// cookie, the session logs in again and repeats the request exactly
/// once.
///
/// # Thread Safety
///
/// Sessions are cheap to clone (they use internal `Arc`) and are safe to
/// share across tasks. The cookie is held under a lock for the whole
/// login/post/retry sequence, so concurrent sends are serialized.
///
/// # Example
///
/// ```no_run
/// use cheetah::{Options, Params, Session};
///
/// # async fn example() -> Result<(), cheetah::Error> {
/// let options = Options::new("foo.com", "foo_user", "secret", "123");
/// let session = Session::new(&options)?;
///
/// let params = Params::new().with("eid", "welcome").with("email", "foo@bar.baz");
/// session.send_message("/ebm/ebmtrigger1", params).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    base_url: ServiceUrl,
    credentials: Credentials,
    default_params: Params,
    transport: Arc<dyn Transport>,
    cookie: Mutex<Option<SessionCookie>>,
}

impl Session {
    /// Create a session that talks to the service over HTTPS.
    ///
    /// No request is made until the first [`send_message`](Self::send_message).
    ///
    /// # Errors
    ///
    /// Returns an error if the options are incomplete or the HTTP client
    /// cannot be built.
    pub fn new(options: &Options) -> Result<Self> {
        options.validate()?;
        let transport = HttpTransport::new(options.verify_peer)?;
        Self::with_transport(options, Arc::new(transport))
    }

    /// Create a session over a caller-supplied transport.
    pub fn with_transport(options: &Options, transport: Arc<dyn Transport>) -> Result<Self> {
        options.validate()?;

        Ok(Self {
            inner: Arc::new(SessionInner {
                base_url: options.service_url()?,
                credentials: options.credentials(),
                default_params: options.default_params(),
                transport,
                cookie: Mutex::new(None),
            }),
        })
    }

    /// Returns the service base URL.
    pub fn base_url(&self) -> &ServiceUrl {
        &self.inner.base_url
    }

    /// Returns the parameters merged into every request.
    pub fn default_params(&self) -> &Params {
        &self.inner.default_params
    }

    /// Returns the cookie currently held, if any.
    pub async fn cookie(&self) -> Option<SessionCookie> {
        self.inner.cookie.lock().await.clone()
    }

    /// Log in now instead of on the first request.
    ///
    /// Replaces any cookie already held.
    pub async fn login(&self) -> Result<()> {
        let mut cookie = self.inner.cookie.lock().await;
        *cookie = None;
        *cookie = Some(self.exchange_credentials().await?);
        Ok(())
    }

    /// Send a request to `path`.
    ///
    /// Default parameters are appended to `params` for every key the
    /// caller did not set; explicit values win.
    ///
    /// # Errors
    ///
    /// - [`Error::Auth`] if the service rejects the cookie again right
    ///   after a fresh login
    /// - [`Error::Temporary`] for server-side failures worth retrying later
    /// - [`Error::Permanent`] for everything the service will never
    ///   accept, including rejected credentials at login
    /// - [`Error::Transport`] if the request could not be delivered
    #[instrument(skip(self, params), fields(host = %self.inner.base_url))]
    pub async fn send_message(&self, path: &str, mut params: Params) -> Result<()> {
        params.merge_defaults(&self.inner.default_params);

        let mut cookie = self.inner.cookie.lock().await;

        let current = match cookie.as_ref() {
            Some(current) => current.clone(),
            None => {
                let fresh = self.exchange_credentials().await?;
                *cookie = Some(fresh.clone());
                fresh
            }
        };

        let (outcome, _) = self.post(path, &params, Some(&current)).await?;

        match outcome {
            Classification::Auth(reason) => {
                warn!(%reason, "session cookie rejected, logging in again");
                *cookie = None;
                let fresh = self.exchange_credentials().await?;
                *cookie = Some(fresh.clone());

                let (retried, _) = self.post(path, &params, Some(&fresh)).await?;
                retried.into_result()
            }
            other => other.into_result(),
        }
    }

    /// Post the credentials and pull the session cookie out of the reply.
    ///
    /// The last `set-cookie` header is the session cookie. The caller
    /// holds the cookie lock.
    async fn exchange_credentials(&self) -> Result<SessionCookie> {
        let credentials = &self.inner.credentials;
        info!(username = %credentials.username(), "Logging in");

        let params = Params::new()
            .with("name", credentials.username())
            .with("cleartext", credentials.password());

        let (outcome, headers) = self.post(LOGIN_PATH, &params, None).await?;

        if let Classification::Auth(reason) = outcome {
            debug!(%reason, "login rejected");
            return Err(Error::Permanent(
                "authorization exception while logging in".to_string(),
            ));
        }
        outcome.into_result()?;

        let cookie = headers
            .get("set-cookie")
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                Error::Permanent("login response did not include a session cookie".to_string())
            })?;
        if HeaderValue::from_str(cookie).is_err() {
            return Err(Error::Permanent(
                "session cookie is not valid header text".to_string(),
            ));
        }

        debug!("Session cookie obtained");
        Ok(SessionCookie::new(cookie))
    }

    async fn post(
        &self,
        path: &str,
        params: &Params,
        cookie: Option<&SessionCookie>,
    ) -> Result<(Classification, Headers)> {
        let request = PostRequest {
            url: self.inner.base_url.endpoint(path),
            cookie: cookie.map(|c| c.as_str().to_string()),
            body: params.to_form_body(),
        };
        debug!(path, "Posting");

        let response = self.inner.transport.post(request).await?;

        let description = format!("{}?{}", path, params.to_redacted_query());
        let outcome = classify(&description, response.status, &response.body);
        debug!(
            path,
            status = response.status,
            success = outcome.is_success(),
            "Response classified"
        );

        Ok((outcome, response.headers))
    }
}

// Custom Debug impl that hides sensitive data
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.inner.base_url)
            .field("credentials", &self.inner.credentials)
            .field("cookie", &"[REDACTED]")
            .finish()
    }
}
