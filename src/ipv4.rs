/// IPv4 host handling supporting decimal, octal, and hexadecimal notation,
/// both dotted and as a single number, the way browsers accept them.
use crate::character_sets::split_by_dot;
use crate::compat::{String, format};

/// Smallest single-number host accepted as an IPv4 address (1.1.1.0).
/// Anything below cannot spell four non-zero-ish octets; browsers reject it.
pub const MIN_IP_FROM_HEX_OR_DECIMAL: u64 = 16_843_008;

/// Largest single-number host accepted as an IPv4 address (255.255.255.255)
pub const MAX_IP_FROM_HEX_OR_DECIMAL: u64 = 4_294_967_295;

/// Largest value of one dotted part
pub const MAX_IPV4_PART: u64 = 255;

/// Bytes 12..16 of an IPv4-mapped IPv6 address hold the IPv4 address
pub const IPV4_MAPPED_IPV6_START_OFFSET: usize = 12;

/// Check whether a lowercased host read by the domain reader is an IPv4
/// address. `dots` is the number of dots the reader counted.
///
/// Accepted forms:
/// - No dots: `0xC0A80101`, `030052000401`, `3232235777`, within
///   [`MIN_IP_FROM_HEX_OR_DECIMAL`, `MAX_IP_FROM_HEX_OR_DECIMAL`]
/// - Dotted quad: each part hex, octal or decimal, at most 255, empty = 0
pub fn is_valid_ipv4(test_domain: &str, dots: usize) -> bool {
    if test_domain.is_empty() {
        return false;
    }

    match dots {
        0 => {
            let value = if test_domain.len() > 2 && test_domain.starts_with("0x") {
                parse_ipv4_number(&test_domain[2..], 16)
            } else if let Some(octal) = test_domain.strip_prefix('0') {
                parse_ipv4_number(octal, 8)
            } else {
                parse_ipv4_number(test_domain, 10)
            };
            value.is_some_and(|value| {
                (MIN_IP_FROM_HEX_OR_DECIMAL..=MAX_IP_FROM_HEX_OR_DECIMAL).contains(&value)
            })
        }
        3 => split_by_dot(test_domain).iter().all(|part| {
            let value = if part.len() > 2 && part.starts_with("0x") {
                parse_ipv4_number(&part[2..], 16)
            } else if part.len() > 1 && part.starts_with('0') {
                parse_ipv4_number(&part[1..], 8)
            } else if part.is_empty() {
                Some(0)
            } else {
                parse_ipv4_number(part, 10)
            };
            value.is_some_and(|value| value <= MAX_IPV4_PART)
        }),
        _ => false,
    }
}

/// Decode a lowercased host into the 16 bytes of an IPv4-mapped IPv6
/// address. Accepts one number or four dotted parts in any base; returns
/// `None` for anything else.
pub fn decode_ipv4(host: &str) -> Option<[u8; 16]> {
    let parts = split_by_dot(host);
    let num_parts = parts.len();
    if num_parts != 4 && num_parts != 1 {
        return None;
    }

    let mut bytes = [0u8; 16];
    bytes[10] = 0xff;
    bytes[11] = 0xff;

    for (i, part) in parts.iter().enumerate() {
        let (digits, radix) = if let Some(hex) = part.strip_prefix("0x") {
            (hex, 16)
        } else if let Some(octal) = part.strip_prefix('0') {
            (octal, 8)
        } else {
            (part.as_str(), 10)
        };
        let section = if digits.is_empty() {
            0
        } else {
            parse_ipv4_number(digits, radix)?
        };

        if num_parts == 1 {
            if section > MAX_IP_FROM_HEX_OR_DECIMAL {
                return None;
            }
            bytes[IPV4_MAPPED_IPV6_START_OFFSET..].copy_from_slice(&(section as u32).to_be_bytes());
            return Some(bytes);
        }

        if section > MAX_IPV4_PART {
            return None;
        }
        bytes[IPV4_MAPPED_IPV6_START_OFFSET + i] = section as u8;
    }

    Some(bytes)
}

/// Parse the digits of one IPv4 component in the given radix.
fn parse_ipv4_number(digits: &str, radix: u32) -> Option<u64> {
    // from_str_radix tolerates a leading '+', browsers do not
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}

/// Serialize an IPv4 address (u32) to dotted decimal notation
pub fn serialize_ipv4(ipv4: u32) -> String {
    format!(
        "{}.{}.{}.{}",
        (ipv4 >> 24) & 0xFF,
        (ipv4 >> 16) & 0xFF,
        (ipv4 >> 8) & 0xFF,
        ipv4 & 0xFF
    )
}
