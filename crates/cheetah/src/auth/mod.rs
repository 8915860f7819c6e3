//! Authentication types and session management.
//!
//! All requests to the service go through a [`Session`], which logs in on
//! demand and holds the resulting cookie.

mod cookie;
mod credentials;
mod session;

pub use cookie::SessionCookie;
pub use credentials::Credentials;
pub use session::{LOGIN_PATH, Session};
