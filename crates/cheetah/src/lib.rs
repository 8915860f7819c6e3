//! cheetah - CheetahMail API client
//!
//! This library talks to the CheetahMail form-post API with a
//! session-centric design. All requests flow through a [`Session`], which
//! logs in on demand, keeps the session cookie, and transparently logs in
//! again once when the service reports the cookie as stale.
//!
//! # Example
//!
//! ```no_run
//! use cheetah::{Mailer, Options, Params};
//!
//! # async fn example() -> Result<(), cheetah::Error> {
//! let options = Options::new("ebm.cheetahmail.com", "api_user", "secret", "2083")
//!     .with_disable_tracking(true);
//! let mailer = Mailer::new(&options)?;
//!
//! mailer.send_email("welcome", "foo@bar.baz", Params::new()).await?;
//! mailer
//!     .mailing_list_update("foo@bar.baz", Params::new().with("sub", "123"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod error;
pub mod http;
pub mod mailer;
pub mod options;
pub mod params;
pub mod types;

// Re-export primary types at crate root for convenience
pub use auth::{Credentials, Session, SessionCookie};
pub use error::{Error, ErrorKind};
pub use mailer::{Delivery, Mailer, Message};
pub use options::Options;
pub use params::Params;
pub use types::ServiceUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
