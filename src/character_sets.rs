use crate::compat::{String, Vec};

/// First code point treated as an international domain character
pub const INTERNATIONAL_CHAR_START: char = '\u{c0}';

/// Unreserved characters per RFC 3986: ALPHA / DIGIT / "-" / "." / "_" / "~"
const UNRESERVED_TABLE: [bool; 128] = {
    let mut table = [false; 128];

    let mut i = b'a';
    while i <= b'z' {
        table[i as usize] = true;
        table[(i - 32) as usize] = true;
        i += 1;
    }
    let mut i = b'0';
    while i <= b'9' {
        table[i as usize] = true;
        i += 1;
    }
    table[b'-' as usize] = true;
    table[b'.' as usize] = true;
    table[b'_' as usize] = true;
    table[b'~' as usize] = true;

    table
};

pub fn is_hex(c: char) -> bool {
    c.is_ascii_hexdigit()
}

pub fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic()
}

pub fn is_numeric(c: char) -> bool {
    c.is_ascii_digit()
}

pub fn is_alpha_numeric(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Check if a character may appear unescaped in an IPv6 zone index
pub fn is_unreserved(c: char) -> bool {
    (c as u32) < 128 && UNRESERVED_TABLE[c as usize]
}

/// Check for a dot or one of its full-width look-alikes
/// (ideographic full stop, full-width and half-width full stops)
pub fn is_dot(c: char) -> bool {
    matches!(c, '.' | '\u{3002}' | '\u{ff0e}' | '\u{ff61}')
}

/// Whitespace that terminates a URL candidate
pub fn is_white_space(c: char) -> bool {
    matches!(c, '\n' | '\t' | '\r' | ' ')
}

/// Check if the two characters after a `%` spell an encoded dot
pub fn is_encoded_dot(first: char, second: char) -> bool {
    first == '2' && matches!(second, 'e' | 'E')
}

/// Split a host on every kind of dot, including the `%2e` escape.
/// Always returns at least one (possibly empty) section.
pub fn split_by_dot(input: &str) -> Vec<String> {
    let mut sections = Vec::new();
    let mut section = String::new();
    let chars: Vec<char> = input.chars().collect();

    let mut i = 0;
    while i < chars.len() {
        let curr = chars[i];
        if is_dot(curr) {
            sections.push(core::mem::take(&mut section));
        } else if curr == '%' && i + 2 < chars.len() && is_encoded_dot(chars[i + 1], chars[i + 2]) {
            sections.push(core::mem::take(&mut section));
            i += 2;
        } else {
            section.push(curr);
        }
        i += 1;
    }
    sections.push(section);

    sections
}
