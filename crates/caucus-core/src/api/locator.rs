//! Request locators for the bill API.
//!
//! An [`ApiLocator`] is a base record (scheme, host, path, fragment) plus an
//! explicit map of query parameters. Parameters live in a `BTreeMap`, so the
//! serialized query string always lists keys in sorted order.

use std::collections::BTreeMap;
use std::fmt;

use url::Url;
use url::form_urlencoded;

pub const DEFAULT_SCHEME: &str = "https";
pub const DEFAULT_HOST: &str = "www.govtrack.us";
pub const DEFAULT_BILL_PATH: &str = "/api/v2/bill";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiLocator {
    pub scheme: String,
    pub host: String,
    pub path: String,
    pub fragment: String,
    query: BTreeMap<String, String>,
}

impl ApiLocator {
    /// A locator for `https://{host}` with an empty path and no parameters.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            host: host.into(),
            path: String::new(),
            fragment: String::new(),
            query: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.set_param(name, value);
        self
    }

    /// Insert or replace a query parameter.
    pub fn set_param(&mut self, name: impl Into<String>, value: impl ToString) {
        self.query.insert(name.into(), value.to_string());
    }

    /// Remove a query parameter, returning its previous value.
    pub fn remove_param(&mut self, name: &str) -> Option<String> {
        self.query.remove(name)
    }

    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Iterate parameters in serialization order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.query.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Locator for `{path}/{segment}` on the same host, without query
    /// parameters or fragment. Used for per-object detail requests.
    #[must_use]
    pub fn child(&self, segment: impl fmt::Display) -> Self {
        Self {
            scheme: self.scheme.clone(),
            host: self.host.clone(),
            path: format!("{}/{segment}", self.path.trim_end_matches('/')),
            fragment: String::new(),
            query: BTreeMap::new(),
        }
    }

    /// Serialize to a request string with a form-encoded query.
    #[must_use]
    pub fn to_url_string(&self) -> String {
        let mut out = format!("{}://{}", self.scheme, self.host);
        if !self.path.is_empty() && !self.path.starts_with('/') {
            out.push('/');
        }
        out.push_str(&self.path);

        if !self.query.is_empty() {
            let encoded = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(self.query.iter())
                .finish();
            out.push('?');
            out.push_str(&encoded);
        }

        if !self.fragment.is_empty() {
            out.push('#');
            out.push_str(&self.fragment);
        }

        out
    }

    /// Parse the serialized locator into a [`Url`], validating it.
    ///
    /// # Errors
    ///
    /// Returns a parse error if scheme or host produce an invalid URL.
    pub fn to_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.to_url_string())
    }
}

impl Default for ApiLocator {
    fn default() -> Self {
        Self::new(DEFAULT_HOST).with_path(DEFAULT_BILL_PATH)
    }
}

impl fmt::Display for ApiLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_url_string())
    }
}
