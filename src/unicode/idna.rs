use crate::compat::{String, ToString};
use idna::AsciiDenyList;

/// Check if 4 bytes match "xn--" (case insensitive)
pub fn is_punycode_prefix(slice: &[u8]) -> bool {
    slice.len() >= 4
        && matches!(slice[0], b'x' | b'X')
        && matches!(slice[1], b'n' | b'N')
        && slice[2] == b'-'
        && slice[3] == b'-'
}

/// Convert a host to its ASCII-compatible encoding.
///
/// ASCII hosts are returned unchanged; anything else goes through UTS #46
/// `ToASCII` without a deny list, so URL delimiters such as `[`, `:` and `%`
/// survive. Returns `None` when the host cannot be converted.
pub fn domain_to_ascii(domain: &str) -> Option<String> {
    // Fast path: most hosts are plain ASCII
    if domain.is_ascii() {
        return Some(domain.to_string());
    }

    idna::domain_to_ascii_cow(domain.as_bytes(), AsciiDenyList::EMPTY)
        .ok()
        .map(|ascii| ascii.into_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_is_punycode_prefix() {
        assert!(is_punycode_prefix(b"xn--p1ai"));
        assert!(is_punycode_prefix(b"XN--P1AI"));
        assert!(!is_punycode_prefix(b"xn-"));
        assert!(!is_punycode_prefix(b"xm--"));
    }

    #[test]
    fn test_domain_to_ascii() {
        // ASCII domain should pass through untouched
        assert_eq!(domain_to_ascii("Example.com").unwrap(), "Example.com");
        assert_eq!(domain_to_ascii("[::1]").unwrap(), "[::1]");

        // Unicode domain should be converted
        let result = domain_to_ascii("日本.jp").unwrap();
        assert!(result.starts_with("xn--"));
        assert!(result.ends_with(".jp"));
    }
}
