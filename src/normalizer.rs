pub mod host;
pub mod path;

use core::fmt;

use crate::compat::{String, ToString};
use crate::error::Result;
use crate::url_base::UrlBase;
use crate::url_span::UrlSpan;

/// A detected URL with its host and path in canonical form.
///
/// The host is converted to ASCII, lowercased, and IP hosts are written
/// in their canonical notation. The path has `.`, `..` and duplicate
/// slashes resolved. Both are percent-encoded consistently. The other
/// parts are kept as detected.
///
/// # Examples
///
/// ```
/// use url_detector::{NormalizedUrl, UrlBase};
///
/// let url = NormalizedUrl::create("http://Example.COM/a/b/.//./../c").unwrap();
/// assert_eq!(url.host(), "example.com");
/// assert_eq!(url.path(), "/a/c");
/// assert_eq!(url.full_url(), "http://example.com/a/c");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUrl {
    original_url: String,
    scheme: String,
    username: String,
    password: String,
    host: String,
    host_bytes: Option<[u8; 16]>,
    port: Option<u16>,
    path: String,
    query: String,
    fragment: String,
}

impl NormalizedUrl {
    /// Detect exactly one URL in `text` and normalize it.
    ///
    /// # Errors
    ///
    /// Same as [`UrlSpan::create`].
    pub fn create(text: &str) -> Result<Self> {
        Ok(UrlSpan::create(text)?.normalize())
    }

    pub(crate) fn from_span(span: &UrlSpan) -> Self {
        let host = host::normalize(span.host());
        Self {
            original_url: span.original_url().to_string(),
            scheme: span.scheme().to_string(),
            username: span.username().to_string(),
            password: span.password().to_string(),
            host: host.host,
            host_bytes: host.bytes,
            port: span.port(),
            path: path::normalize_path(span.path()),
            query: span.query().to_string(),
            fragment: span.fragment().to_string(),
        }
    }

    /// Address bytes when the host is an IP address.
    /// IPv4 addresses are returned IPv4-mapped (`::ffff:a.b.c.d`).
    pub fn host_bytes(&self) -> Option<[u8; 16]> {
        self.host_bytes
    }
}

impl UrlBase for NormalizedUrl {
    fn original_url(&self) -> &str {
        &self.original_url
    }

    fn scheme(&self) -> &str {
        &self.scheme
    }

    fn username(&self) -> &str {
        &self.username
    }

    fn password(&self) -> &str {
        &self.password
    }

    fn host(&self) -> &str {
        &self.host
    }

    fn port(&self) -> Option<u16> {
        self.port
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn query(&self) -> &str {
        &self.query
    }

    fn fragment(&self) -> &str {
        &self.fragment
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_url())
    }
}
