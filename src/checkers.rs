/// Parse a port string to u16.
/// Returns None if empty, contains non-digit characters, or is out of range.
pub fn parse_port(port: &str) -> Option<u16> {
    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    port.parse::<u16>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("80"), Some(80));
        assert_eq!(parse_port("8080"), Some(8080));
        assert_eq!(parse_port("443"), Some(443));
        assert_eq!(parse_port("65535"), Some(65535));
        assert_eq!(parse_port("65536"), None); // Out of range
        assert_eq!(parse_port("abc"), None);
        assert_eq!(parse_port("+80"), None);
        assert_eq!(parse_port(""), None);
    }
}
