//! High-level CheetahMail operations.
//!
//! The mailer builds the path and parameters for each API call and
//! decides whether a message goes out at all. Everything else is the
//! [`Session`]'s job.

use regex::Regex;
use tracing::{debug, info, instrument};

use crate::Result;
use crate::auth::Session;
use crate::options::Options;
use crate::params::Params;

/// Trigger email endpoint.
pub const EBM_TRIGGER_PATH: &str = "/ebm/ebmtrigger1";

/// Subscriber update endpoint.
pub const SET_USER_PATH: &str = "/api/setuser1";

/// A request waiting to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub path: String,
    pub params: Params,
}

impl Message {
    pub fn new(path: impl Into<String>, params: Params) -> Self {
        Self {
            path: path.into(),
            params,
        }
    }

    /// The recipient address, if the message has one.
    pub fn email(&self) -> Option<&str> {
        self.params.get("email")
    }
}

/// What happened to a message handed to the mailer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// The recipient did not match the whitelist; nothing was sent.
    Suppressed,
}

/// Composes API calls on top of a [`Session`].
#[derive(Debug, Clone)]
pub struct Mailer {
    session: Session,
    whitelist: Option<Regex>,
}

impl Mailer {
    /// Build a mailer and its session from options.
    pub fn new(options: &Options) -> Result<Self> {
        let session = Session::new(options)?;
        Ok(Self::with_session(session, options.whitelist()?))
    }

    pub fn with_session(session: Session, whitelist: Option<Regex>) -> Self {
        Self { session, whitelist }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Whether a message addressed to `email` would be sent.
    ///
    /// Without a whitelist everything goes out. With one, the address
    /// must be present and match.
    pub fn allows(&self, email: Option<&str>) -> bool {
        match &self.whitelist {
            None => true,
            Some(filter) => email.is_some_and(|email| filter.is_match(email)),
        }
    }

    /// Send a composed message unless the whitelist suppresses it.
    #[instrument(skip(self, message), fields(path = %message.path))]
    pub async fn deliver(&self, message: Message) -> Result<Delivery> {
        if !self.allows(message.email()) {
            info!("Recipient not whitelisted, message suppressed");
            return Ok(Delivery::Suppressed);
        }

        self.session
            .send_message(&message.path, message.params)
            .await?;
        debug!("Message sent");
        Ok(Delivery::Sent)
    }

    /// Trigger the email identified by `eid` for `email`.
    ///
    /// `params` carries personalisation fields and is sent after `eid`
    /// and `email`.
    pub async fn send_email(&self, eid: &str, email: &str, params: Params) -> Result<Delivery> {
        let mut merged = Params::new().with("eid", eid).with("email", email);
        for (key, value) in params.iter() {
            if !merged.contains_key(key) {
                merged.insert(key, value);
            }
        }
        self.deliver(Message::new(EBM_TRIGGER_PATH, merged)).await
    }

    /// Create or update the subscriber `email` with `params`.
    pub async fn mailing_list_update(&self, email: &str, mut params: Params) -> Result<Delivery> {
        params.insert("email", email);
        self.deliver(Message::new(SET_USER_PATH, params)).await
    }

    /// Move a subscriber from `old_email` to `new_email`.
    pub async fn mailing_list_email_change(
        &self,
        old_email: &str,
        new_email: &str,
    ) -> Result<Delivery> {
        let params = Params::new()
            .with("email", old_email)
            .with("newemail", new_email);
        self.deliver(Message::new(SET_USER_PATH, params)).await
    }
}
