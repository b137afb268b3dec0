use std::sync::LazyLock;

use regex::Regex;

/// Default URL pattern: optional scheme, dotted host, optional port and path.
pub const DEFAULT_URL_PATTERN: &str =
    r"^(?i)(https?://)?([a-z0-9]([a-z0-9-]*[a-z0-9])?\.)+[a-z]{2,}(:\d{1,5})?([/?#][^\s]*)?$";

static DEFAULT_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_URL_PATTERN).expect("Invalid default URL pattern"));

#[derive(Debug, Clone, Default)]
enum EmailCheck {
    /// RFC 5322 address check from `email_address`.
    #[default]
    Address,
    Pattern(Regex),
}

/// Email and URL formats used by the `email` and `url` rules.
///
/// The environment may supply its own patterns; otherwise email addresses are
/// checked with [`email_address`] and URLs with [`DEFAULT_URL_PATTERN`].
#[derive(Debug, Clone)]
pub struct Patterns {
    email: EmailCheck,
    url: Regex,
}

impl Default for Patterns {
    fn default() -> Self {
        Self {
            email: EmailCheck::default(),
            url: DEFAULT_URL.clone(),
        }
    }
}

impl Patterns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `pattern` for email checks.
    pub fn with_email(mut self, pattern: Regex) -> Self {
        self.email = EmailCheck::Pattern(pattern);
        self
    }

    /// Use `pattern` for URL checks.
    pub fn with_url(mut self, pattern: Regex) -> Self {
        self.url = pattern;
        self
    }

    pub fn is_email(&self, value: &str) -> bool {
        match &self.email {
            EmailCheck::Address => email_address::EmailAddress::is_valid(value),
            EmailCheck::Pattern(re) => re.is_match(value),
        }
    }

    pub fn is_url(&self, value: &str) -> bool {
        self.url.is_match(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_email() {
        let patterns = Patterns::default();
        assert!(patterns.is_email("user@example.com"));
        assert!(!patterns.is_email("not-an-email"));
    }

    #[test]
    fn test_default_url() {
        let patterns = Patterns::default();
        assert!(patterns.is_url("https://example.com/path?q=1"));
        assert!(patterns.is_url("example.org"));
        assert!(patterns.is_url("http://sub.example.co.uk:8080"));
        assert!(!patterns.is_url("not a url"));
        assert!(!patterns.is_url("localhost"));
    }

    #[test]
    fn test_custom_email_pattern() {
        let patterns = Patterns::new().with_email(Regex::new(r"^[a-z]+@corp\.test$").unwrap());
        assert!(patterns.is_email("alice@corp.test"));
        assert!(!patterns.is_email("alice@example.com"));
    }
}
