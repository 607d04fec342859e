use crate::types::SchemeType;

/// Scheme prefixes the detector accepts, including the `%3a`-encoded colon
pub const VALID_SCHEMES: [&str; 8] = [
    "http://",
    "https://",
    "ftp://",
    "ftps://",
    "http%3a//",
    "https%3a//",
    "ftp%3a//",
    "ftps%3a//",
];

/// Prefix that is never read as a scheme when matching HTML
pub const HTML_MAILTO: &str = "mailto:";

/// Default scheme for URLs detected without one
pub const DEFAULT_SCHEME: &str = "http";

/// Get the scheme type from a scheme string.
/// Uses perfect hash based on length + first byte to minimize comparisons.
pub fn get_scheme_type(scheme: &str) -> SchemeType {
    let bytes = scheme.as_bytes();

    // Perfect hash: filter by length first, then first byte, then full comparison
    match (bytes.len(), bytes.first()) {
        (3, Some(b'f' | b'F')) if bytes.eq_ignore_ascii_case(b"ftp") => SchemeType::Ftp,
        (4, Some(b'h' | b'H')) if bytes.eq_ignore_ascii_case(b"http") => SchemeType::Http,
        (4, Some(b'f' | b'F')) if bytes.eq_ignore_ascii_case(b"ftps") => SchemeType::Ftps,
        (5, Some(b'h' | b'H')) if bytes.eq_ignore_ascii_case(b"https") => SchemeType::Https,
        _ => SchemeType::Other,
    }
}

/// Check whether `buffer` ends with `suffix`, ignoring ASCII case
pub fn ends_with_ignore_case(buffer: &[char], suffix: &str) -> bool {
    let len = suffix.chars().count();
    buffer.len() >= len
        && buffer[buffer.len() - len..]
            .iter()
            .zip(suffix.chars())
            .all(|(a, b)| a.eq_ignore_ascii_case(&b))
}

/// Find a valid scheme prefix at the end of `buffer`.
///
/// Returns the index where the scheme starts. Text before the scheme is
/// allowed as long as it does not run into the scheme name, so
/// `(http://` matches while `xhttp://` does not.
pub fn find_scheme_start(buffer: &[char]) -> Option<usize> {
    VALID_SCHEMES.iter().find_map(|scheme| {
        if !ends_with_ignore_case(buffer, scheme) {
            return None;
        }
        let start = buffer.len() - scheme.len();
        let glued = start > 0 && buffer[start - 1].is_ascii_alphanumeric();
        (!glued).then_some(start)
    })
}
