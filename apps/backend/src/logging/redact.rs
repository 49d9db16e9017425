use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Registry of the patterns used to scrub storage error text before logging.
pub struct RedactRegexRegistry;

impl RedactRegexRegistry {
    /// `scheme://user:password@` in connection strings
    pub fn url_credentials() -> &'static Regex {
        static URL_CREDENTIALS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"(?P<prefix>[A-Za-z][A-Za-z0-9+.-]*://[^:/\s@]+):[^@\s]+@").unwrap()
        });
        &URL_CREDENTIALS_REGEX
    }

    /// Base64-like or hex runs (at least 32 chars), the shape of service keys
    pub fn opaque_token() -> &'static Regex {
        static OPAQUE_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9+/]{32,}={0,2}").unwrap()
        });
        &OPAQUE_TOKEN_REGEX
    }
}

/// Masks connection-string passwords and opaque key material.
///
/// Credentials are masked first so the token pass never sees a half-masked URL.
pub fn redact(input: &str) -> String {
    let without_credentials =
        RedactRegexRegistry::url_credentials().replace_all(input, "${prefix}:***@");
    RedactRegexRegistry::opaque_token()
        .replace_all(&without_credentials, "[REDACTED_TOKEN]")
        .to_string()
}

/// Display wrapper that applies [`redact`] when formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}
