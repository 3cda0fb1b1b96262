//! `scheme://host/path` view of a raw string
//!
//! Only `http://` and `https://` are recognized. Detection is a plain substring search, so a prefix does not have to
//! be at the start of the string. Everything after the host (query, fragment, ...) is treated as part of the path.

const HTTP: &str = "http://";
const HTTPS: &str = "https://";

/// Does `raw` contain a recognized scheme prefix
pub fn looks_like_url(raw: &str) -> bool {
    raw.contains(HTTP) || raw.contains(HTTPS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    /// `http://` is checked before `https://`
    fn detect(raw: &str) -> Option<Scheme> {
        if raw.contains(HTTP) {
            return Some(Scheme::Http);
        }

        if raw.contains(HTTPS) {
            return Some(Scheme::Https);
        }

        None
    }

    fn prefix(self) -> &'static str {
        match self {
            Scheme::Http => HTTP,
            Scheme::Https => HTTPS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

/// A raw string split into scheme, host and path on demand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlValue {
    raw: String,
}

impl UrlValue {
    /// Never fails, an empty `raw` gives the empty value
    pub fn parse(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The raw string with exactly one occurrence of the detected scheme prefix removed
    pub fn without_scheme(&self) -> String {
        match Scheme::detect(&self.raw) {
            Some(scheme) => self.raw.replacen(scheme.prefix(), "", 1),
            None => self.raw.clone(),
        }
    }

    pub fn hostname(&self) -> String {
        let without_scheme = self.without_scheme();
        match without_scheme.find('/') {
            Some(index) => without_scheme[..index].to_string(),
            None => without_scheme,
        }
    }

    /// Everything from the first `/` after the scheme, or the empty string
    pub fn path(&self) -> String {
        let without_scheme = self.without_scheme();
        match without_scheme.find('/') {
            Some(index) => without_scheme[index..].to_string(),
            None => String::new(),
        }
    }

    /// `"http"` or `"https"`
    ///
    /// Falls back to `"http"` for a non-empty string without any recognized prefix.
    pub fn scheme(&self) -> &'static str {
        if self.is_empty() {
            return "";
        }

        Scheme::detect(&self.raw).unwrap_or(Scheme::Http).as_str()
    }

    /// Scheme and host of `origin` followed by the path of `self`
    pub fn rebase(&self, origin: &UrlValue) -> String {
        format!("{}://{}{}", origin.scheme(), origin.hostname(), self.path())
    }
}

impl std::fmt::Display for UrlValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}://{}{}", self.scheme(), self.hostname(), self.path())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn split() {
        let url = UrlValue::parse("https://api.example.com/v1/users?page=2");
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.without_scheme(), "api.example.com/v1/users?page=2");
        assert_eq!(url.hostname(), "api.example.com");
        assert_eq!(url.path(), "/v1/users?page=2");
    }

    #[test]
    fn no_path() {
        let url = UrlValue::parse("http://localhost:8080");
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.hostname(), "localhost:8080");
        assert_eq!(url.path(), "");
        assert_eq!(url.to_string(), "http://localhost:8080");
    }

    #[test]
    fn empty() {
        let url = UrlValue::parse("");
        assert!(url.is_empty());
        assert_eq!(url.scheme(), "");
        assert_eq!(url.without_scheme(), "");
        assert_eq!(url.hostname(), "");
        assert_eq!(url.path(), "");
    }

    #[test]
    fn no_scheme_defaults_to_http() {
        let url = UrlValue::parse("example.com/index.html");
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.without_scheme(), "example.com/index.html");
        assert_eq!(url.hostname(), "example.com");
        assert_eq!(url.path(), "/index.html");
    }

    #[test]
    fn http_is_checked_first() {
        let url = UrlValue::parse("https://proxy.example/?target=http://inner.example");
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.without_scheme(), "https://proxy.example/?target=inner.example");
    }

    #[test]
    fn prefix_does_not_need_to_lead() {
        let url = UrlValue::parse("see http://docs.example/start");
        assert_eq!(url.without_scheme(), "see docs.example/start");
        assert_eq!(url.hostname(), "see docs.example");
        assert_eq!(url.path(), "/start");
    }

    #[test]
    fn rebase_keeps_own_path() {
        let current = UrlValue::parse("https://old-host.example/foo/bar?x=1");
        let origin = UrlValue::parse("http://new-host.example");
        assert_eq!(current.rebase(&origin), "http://new-host.example/foo/bar?x=1");
    }

    #[test]
    fn looks_like_url_needs_a_full_prefix() {
        assert!(looks_like_url("https://a"));
        assert!(looks_like_url("xhttp://a"));
        assert!(!looks_like_url("http:/a"));
        assert!(!looks_like_url("hello world"));
        assert!(!looks_like_url(""));
    }
}
