/// IPv6 literal validation, decoding and serialization
use crate::character_sets::{is_hex, is_unreserved, split_by_dot};
use crate::compat::{String, Vec};
use crate::ipv4::{IPV4_MAPPED_IPV6_START_OFFSET, decode_ipv4, is_valid_ipv4};
use core::fmt::Write;

/// Maximum number of 16-bit sections in an address
const MAX_SECTIONS: usize = 8;

/// Maximum number of hex digits in one section
const MAX_HEX_DIGITS: usize = 4;

/// Validate a lowercased bracketed IPv6 literal the way browsers do.
///
/// Allows one `::` compression, an embedded IPv4 tail (in any notation the
/// IPv4 reader accepts, including `%2e` dots) and a zone index made of
/// unreserved characters. The literal must either spell all 8 sections or
/// use compression, and must contain more than one section.
pub fn is_valid_ipv6(test_domain: &str) -> bool {
    let chars: Vec<char> = test_domain.chars().collect();

    // Require [...] and reject "[:" unless it is "[::"
    if chars.len() < 3
        || chars[chars.len() - 1] != ']'
        || chars[0] != '['
        || (chars[1] == ':' && chars[2] != ':')
    {
        return false;
    }

    let mut num_sections = 1;
    let mut hex_digits = 0;
    let mut prev_char = '\0';

    // Collects a possible IPv4 tail
    let mut last_section = String::new();
    let mut hex_section = true;

    // Set once a bare '%' starts the zone index, e.g. [fe80::1%25eth0]
    let mut zone_index_mode = false;

    // Only one "::" is allowed
    let mut double_colon_flag = false;

    let mut index = 0;
    while index < chars.len() {
        let curr = chars[index];
        match curr {
            '[' => {}
            '%' if chars.get(index + 1) == Some(&'2') && chars.get(index + 2) == Some(&'e') => {
                last_section.push_str("%2e");
                index += 2;
                hex_section = false;
            }
            '%' | ']' => {
                if curr == '%' {
                    zone_index_mode = true;
                }
                if !hex_section && (!zone_index_mode || curr == '%') {
                    // An IPv4 tail takes up two sections
                    if is_valid_ipv4_tail(&last_section) {
                        num_sections += 1;
                    } else {
                        return false;
                    }
                }
            }
            ':' => {
                if prev_char == ':' {
                    if double_colon_flag {
                        return false;
                    }
                    double_colon_flag = true;
                }

                // The previous section held something other than hex digits
                if !hex_section {
                    return false;
                }

                hex_section = true;
                hex_digits = 0;
                num_sections += 1;
                last_section.clear();
            }
            _ => {
                if zone_index_mode {
                    if !is_unreserved(curr) {
                        return false;
                    }
                } else {
                    last_section.push(curr);
                    if hex_section && is_hex(curr) {
                        hex_digits += 1;
                    } else {
                        hex_section = false;
                    }
                }
            }
        }

        if hex_digits > MAX_HEX_DIGITS || num_sections > MAX_SECTIONS {
            return false;
        }
        prev_char = chars[index];
        index += 1;
    }

    num_sections != 1 && (num_sections >= MAX_SECTIONS || double_colon_flag)
}

fn is_valid_ipv4_tail(section: &str) -> bool {
    let dots = split_by_dot(section).len() - 1;
    is_valid_ipv4(section, dots)
}

/// Decode a lowercased, percent-decoded bracketed IPv6 literal into bytes.
/// The zone index is ignored. Returns `None` if the literal is malformed.
pub fn decode_ipv6(host: &str) -> Option<[u8; 16]> {
    let input = host.strip_prefix('[')?.strip_suffix(']')?;
    let input = input.split('%').next().unwrap_or(input);

    let segments = if has_ipv4_tail(input) {
        parse_ipv6_with_ipv4(input)?
    } else {
        parse_ipv6_pure(input)?
    };

    let mut bytes = [0u8; 16];
    for (chunk, segment) in bytes.chunks_exact_mut(2).zip(segments) {
        chunk.copy_from_slice(&segment.to_be_bytes());
    }
    Some(bytes)
}

/// The last section is an IPv4 address when it is not pure hex
fn has_ipv4_tail(input: &str) -> bool {
    input
        .rsplit(':')
        .next()
        .is_some_and(|last| !last.chars().all(is_hex))
}

/// Parse pure IPv6 address (no embedded IPv4).
fn parse_ipv6_pure(input: &str) -> Option<[u16; 8]> {
    expand_segments(input, 8).map(|parsed| {
        let mut segments = [0u16; 8];
        segments.copy_from_slice(&parsed);
        segments
    })
}

/// Parse IPv6 with embedded IPv4 (e.g. "`::ffff:192.168.1.1`").
fn parse_ipv6_with_ipv4(input: &str) -> Option<[u16; 8]> {
    let last_colon = input.rfind(':')?;
    let ipv6_part = &input[..last_colon];
    let ipv4_bytes = decode_ipv4(&input[last_colon + 1..])?;
    let ipv4 = &ipv4_bytes[IPV4_MAPPED_IPV6_START_OFFSET..];

    let mut segments = [0u16; 8];
    // "::a.b.c.d" leaves ":" once the tail is cut off
    let head = if ipv6_part == ":" { "::" } else { ipv6_part };
    if !head.is_empty() {
        segments[..6].copy_from_slice(&expand_segments(head, 6)?);
    }
    segments[6] = u16::from_be_bytes([ipv4[0], ipv4[1]]);
    segments[7] = u16::from_be_bytes([ipv4[2], ipv4[3]]);

    Some(segments)
}

/// Expand "a:b::c" into exactly `total` segments.
fn expand_segments(input: &str, total: usize) -> Option<Vec<u16>> {
    let Some(double_colon_pos) = input.find("::") else {
        // No :: compression - must have exactly `total` segments
        let parsed = parse_segments(input)?;
        return (parsed.len() == total).then_some(parsed);
    };

    let before = parse_segments(&input[..double_colon_pos])?;
    let after = parse_segments(&input[double_colon_pos + 2..])?;
    if before.len() + after.len() >= total {
        return None;
    }

    let mut segments = before;
    segments.resize(total - after.len(), 0);
    segments.extend(after);
    Some(segments)
}

/// Parse a single hex segment (0-ffff).
fn parse_hex_segment(s: &str) -> Option<u16> {
    if s.is_empty() || s.len() > MAX_HEX_DIGITS {
        return None;
    }
    u16::from_str_radix(s, 16).ok()
}

/// Parse colon-separated hex segments from a string.
fn parse_segments(s: &str) -> Option<Vec<u16>> {
    if s.is_empty() {
        return Some(Vec::new());
    }
    s.split(':').map(parse_hex_segment).collect()
}

/// Serialize IPv6 bytes to a bracketed string with zero compression.
pub fn serialize_ipv6(bytes: &[u8; 16]) -> String {
    let mut segments = [0u16; 8];
    for (segment, chunk) in segments.iter_mut().zip(bytes.chunks_exact(2)) {
        *segment = u16::from_be_bytes([chunk[0], chunk[1]]);
    }

    // Find longest sequence of zeros for compression
    let (compress_start, compress_len) = find_longest_zero_sequence(&segments);

    let mut result = String::with_capacity(41);
    result.push('[');

    // Only compress sequences of 2+ zeros
    let compress_range = compress_start
        .filter(|_| compress_len > 1)
        .map(|start| start..start + compress_len);

    let mut i = 0;
    while i < 8 {
        if let Some(ref range) = compress_range
            && range.start == i
        {
            result.push_str("::");
            i = range.end;
            continue;
        }

        if i > 0 && !result.ends_with("::") {
            result.push(':');
        }

        let _ = write!(&mut result, "{:x}", segments[i]);
        i += 1;
    }

    result.push(']');
    result
}

/// Find the longest sequence of consecutive zeros in IPv6 segments.
fn find_longest_zero_sequence(segments: &[u16; 8]) -> (Option<usize>, usize) {
    let mut best_start: Option<usize> = None;
    let mut best_len = 0;
    let mut current_start: Option<usize> = None;
    let mut current_len = 0;

    for (i, &segment) in segments.iter().enumerate() {
        if segment == 0 {
            if current_start.is_none() {
                current_start = Some(i);
                current_len = 1;
            } else {
                current_len += 1;
            }
            if current_len > best_len {
                best_start = current_start;
                best_len = current_len;
            }
        } else {
            current_start = None;
            current_len = 0;
        }
    }

    (best_start, best_len)
}
