use crate::compat::String;
use crate::helpers::remove_extra_dots;
use crate::ipv4::{IPV4_MAPPED_IPV6_START_OFFSET, decode_ipv4, serialize_ipv4};
use crate::ipv6::{decode_ipv6, serialize_ipv6};
use crate::unicode::idna::domain_to_ascii;
use crate::unicode::percent_encode::{percent_decode, percent_encode};

/// A normalized host and, for IP hosts, its address bytes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct NormalizedHost {
    pub host: String,
    /// IPv4 addresses are stored IPv4-mapped
    pub bytes: Option<[u8; 16]>,
}

/// Normalize a host the way a browser would resolve it.
///
/// ```
/// use url_detector::normalize_host;
///
/// assert_eq!(normalize_host("WWW.Example..COM."), "www.example.com");
/// assert_eq!(normalize_host("0xC0A80101"), "192.168.1.1");
/// assert_eq!(normalize_host("[::ffff:192.168.1.1]"), "192.168.1.1");
/// ```
///
/// Returns an empty string when the host cannot be converted to ASCII.
pub fn normalize_host(host: &str) -> String {
    normalize(host).host
}

pub(crate) fn normalize(host: &str) -> NormalizedHost {
    if host.is_empty() {
        return NormalizedHost::default();
    }

    let Some(ascii) = domain_to_ascii(host) else {
        tracing::trace!(host, "host rejected by IDNA conversion");
        return NormalizedHost::default();
    };

    let decoded = percent_decode(&ascii.to_lowercase());
    let bytes = decode_ip(&decoded);
    let host = match &bytes {
        Some(bytes) => serialize_ip(bytes),
        None => decoded,
    };

    if host.is_empty() {
        return NormalizedHost { host, bytes };
    }

    let host = percent_encode(&remove_extra_dots(&host)).replace("\\x", "%");
    NormalizedHost { host, bytes }
}

/// IPv6 only when bracketed, IPv4 in any of its notations otherwise
fn decode_ip(host: &str) -> Option<[u8; 16]> {
    if host.starts_with('[') && host.ends_with(']') {
        decode_ipv6(host)
    } else {
        decode_ipv4(host)
    }
}

fn serialize_ip(bytes: &[u8; 16]) -> String {
    let ipv4_mapped = bytes[..10].iter().all(|&b| b == 0) && bytes[10] == 0xff && bytes[11] == 0xff;
    if !ipv4_mapped {
        return serialize_ipv6(bytes);
    }

    let mut ipv4 = [0u8; 4];
    ipv4.copy_from_slice(&bytes[IPV4_MAPPED_IPV6_START_OFFSET..]);
    serialize_ipv4(u32::from_be_bytes(ipv4))
}
