use crate::character_sets::is_hex;
use crate::compat::{String, ToString, Vec};
use percent_encoding::{AsciiSet, CONTROLS};

/// Encode set used when re-serializing normalized hosts and paths:
/// C0 controls, DEL, space, `#` and `%`. Every byte >= 0x80 is always encoded.
pub const URL_ESCAPE_SET: &AsciiSet = &CONTROLS.add(b' ').add(b'#').add(b'%');

/// Decode every `%XX` escape, unwinding nested encodings such as `%2525`.
///
/// Escapes that only become decodable after a later escape is decoded get a
/// second chance; malformed escapes are left untouched. Decoded bytes map to
/// the character with the same code point.
pub fn percent_decode(input: &str) -> String {
    let mut chars: Vec<char> = input.chars().collect();
    let mut non_decoded_percents: Vec<usize> = Vec::new();

    let mut i = 0;
    while i + 2 < chars.len() {
        if chars[i] == '%' {
            if is_hex(chars[i + 1]) && is_hex(chars[i + 2]) {
                let decoded = decode_hex_pair(chars[i + 1], chars[i + 2]);
                chars.splice(i..i + 3, [decoded]);

                if decoded == '%' {
                    // A new escape may start right here
                    continue;
                }

                let rewind = match non_decoded_percents.last() {
                    Some(&last) if i - last == 2 && is_hex(decoded) && is_hex(chars[i - 1]) => {
                        true
                    }
                    // %[HEX][unknown] right before the end of the string
                    Some(_) => i + 2 == chars.len(),
                    None => false,
                };
                if rewind && let Some(last) = non_decoded_percents.pop() {
                    i = last;
                    continue;
                }
            } else {
                non_decoded_percents.push(i);
            }
        }
        i += 1;
    }

    chars.into_iter().collect()
}

fn decode_hex_pair(high: char, low: char) -> char {
    let value = (high.to_digit(16).unwrap_or(0) << 4) | low.to_digit(16).unwrap_or(0);
    char::from(value as u8)
}

/// Percent-encode control characters, space, DEL, `#`, `%` and everything
/// outside ASCII.
///
/// Characters up to U+00FF are written as the single byte of their code
/// point so that [`percent_decode`] restores them; anything above is written
/// as its UTF-8 bytes.
pub fn percent_encode(input: &str) -> String {
    let mut bytes = Vec::with_capacity(input.len());
    for chr in input.chars() {
        if let Ok(byte) = u8::try_from(u32::from(chr)) {
            bytes.push(byte);
        } else {
            bytes.extend_from_slice(chr.encode_utf8(&mut [0; 4]).as_bytes());
        }
    }

    percent_encoding::percent_encode(&bytes, URL_ESCAPE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_decode() {
        assert_eq!(percent_decode("hello%20world"), "hello world");
        assert_eq!(percent_decode("test"), "test");
        assert_eq!(percent_decode("%2F"), "/");
        assert_eq!(percent_decode("%2e%2E"), "..");
    }

    #[test]
    fn test_percent_decode_nested() {
        assert_eq!(percent_decode("%2525252525252525"), "%");
        assert_eq!(percent_decode("%252e"), ".");
        assert_eq!(percent_decode("%25%32%65"), ".");
    }

    #[test]
    fn test_percent_decode_second_chance() {
        // "%2%41" -> "%2A" -> "*"
        assert_eq!(percent_decode("%2%41"), "*");
    }

    #[test]
    fn test_percent_decode_retry_at_end() {
        // "%%41F" -> "%AF" -> "\u{af}"
        assert_eq!(percent_decode("%%41F"), "\u{af}");
        assert_eq!(percent_decode("%x%41y"), "%xAy");
        // Not at the end, so the outer escape is not retried
        assert_eq!(percent_decode("%%41FG"), "%AFG");
    }

    #[test]
    fn test_percent_decode_leaves_invalid_escapes() {
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
        assert_eq!(percent_decode("%4"), "%4");
        assert_eq!(percent_decode("a%g1b"), "a%g1b");
    }

    #[test]
    fn test_percent_decode_latin1() {
        assert_eq!(percent_decode("caf%E9"), "caf\u{e9}");
    }

    #[test]
    fn test_percent_encode() {
        assert_eq!(percent_encode("a b"), "a%20b");
        assert_eq!(percent_encode("#%"), "%23%25");
        assert_eq!(percent_encode("\u{7f}\u{1}"), "%7F%01");
        assert_eq!(percent_encode("/path?q=1"), "/path?q=1");
        assert_eq!(percent_encode("caf\u{e9}"), "caf%E9");
        assert_eq!(percent_encode("\u{65e5}"), "%E6%97%A5");
    }

    #[test]
    fn test_round_trip() {
        for input in ["example.com", "/a/b?c=d&e", "caf\u{e9} #1 100%"] {
            assert_eq!(percent_decode(&percent_encode(input)), input);
        }
    }
}
