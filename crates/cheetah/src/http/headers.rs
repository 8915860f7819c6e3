//! Response header list.

/// Response headers in the order the server sent them.
///
/// Lookups ignore ASCII case: the service sends `set-cookie` while some
/// proxies and test servers rewrite it to `Set-Cookie`. When a name
/// repeats, the last occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    /// Parse a raw header block.
    ///
    /// Lines are separated by CRLF and the first line is the status line.
    /// Each remaining line is split on the first `": "`. Lines without a
    /// separator are skipped.
    pub fn parse_block(block: &str) -> Self {
        let headers = block
            .split("\r\n")
            .skip(1)
            .filter_map(|line| line.split_once(": "))
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        Self(headers)
    }

    /// Returns the value of the last header called `name`, compared
    /// case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl<N, V> FromIterator<(N, V)> for Headers
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        )
    }
}

// Values that are not visible ASCII are kept lossily so a lookup still finds them
impl From<&reqwest::header::HeaderMap> for Headers {
    fn from(map: &reqwest::header::HeaderMap) -> Self {
        map.iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect()
    }
}
