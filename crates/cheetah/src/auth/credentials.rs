//! API login pair.

use std::fmt;

/// The `name`/`cleartext` pair posted to the login endpoint.
///
/// A session copies these once at construction and never changes them.
/// `Debug` prints the username and masks the password.
///
/// ```
/// use cheetah::Credentials;
///
/// let creds = Credentials::new("foo_user", "foo");
/// assert_eq!(creds.username(), "foo_user");
/// ```
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Sent as `cleartext`; only the login flow reads it.
    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
