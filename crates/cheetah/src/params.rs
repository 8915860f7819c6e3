//! Ordered request parameters.

use url::form_urlencoded;

/// Keys whose values are masked in diagnostics.
const REDACTED_KEYS: &[&str] = &["cleartext"];

/// An ordered list of string parameters sent as a form body.
///
/// Keys are unique. Insertion order is preserved because the service
/// sees the parameters in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    /// Create an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing the value in place if the key exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Builder form of [`Params::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns the value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Append every default whose key is not already present.
    ///
    /// Values supplied by the caller always win over defaults, and the
    /// caller's keys keep their position ahead of the appended defaults.
    pub fn merge_defaults(&mut self, defaults: &Params) {
        for (key, value) in defaults.iter() {
            if !self.contains_key(key) {
                self.0.push((key.to_string(), value.to_string()));
            }
        }
    }

    /// Encode as an `application/x-www-form-urlencoded` body.
    pub fn to_form_body(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }

    /// Encode for diagnostics, masking secret values.
    pub fn to_redacted_query(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter().map(|(k, v)| {
                if REDACTED_KEYS.contains(&k) {
                    (k, "[REDACTED]")
                } else {
                    (k, v)
                }
            }))
            .finish()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut params = Params::new().with("a", "1").with("b", "2");
        params.insert("a", "3");
        assert_eq!(params.to_form_body(), "a=3&b=2");
    }

    #[test]
    fn explicit_params_win_over_defaults() {
        let defaults = Params::new().with("aid", "123").with("test", "1");
        let mut params = Params::new().with("aid", "999").with("email", "a@b.c");

        params.merge_defaults(&defaults);

        assert_eq!(params.get("aid"), Some("999"));
        assert_eq!(params.len(), 3);
        assert_eq!(params.to_form_body(), "aid=999&email=a%40b.c&test=1");
    }

    #[test]
    fn form_body_escapes_like_cgi() {
        let params = Params::new().with("email", "foo@bar.baz").with("name", "a b&c");
        assert_eq!(params.to_form_body(), "email=foo%40bar.baz&name=a+b%26c");
    }

    #[test]
    fn redacted_query_masks_password() {
        let params = Params::new().with("name", "foo_user").with("cleartext", "foo");
        assert_eq!(
            params.to_redacted_query(),
            "name=foo_user&cleartext=%5BREDACTED%5D"
        );
    }

    #[test]
    fn collects_from_pairs() {
        let params: Params = [("sub", "123"), ("email", "x@y.z")].into_iter().collect();
        assert_eq!(params.get("sub"), Some("123"));
        assert!(params.contains_key("email"));
    }
}
