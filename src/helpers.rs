use crate::compat::{String, ToString};

/// Collapse runs of dots and strip leading and trailing dots from a host.
/// Uses SIMD-accelerated memchr to skip hosts without any dot.
pub fn remove_extra_dots(host: &str) -> String {
    if memchr::memchr(b'.', host.as_bytes()).is_none() {
        return host.to_string();
    }

    let mut result = String::with_capacity(host.len());
    let mut previous_dot = false;
    for curr in host.chars() {
        let is_dot = curr == '.';
        if !(is_dot && previous_dot) {
            result.push(curr);
        }
        previous_dot = is_dot;
    }

    let trimmed = result.strip_suffix('.').unwrap_or(&result);
    let trimmed = trimmed.strip_prefix('.').unwrap_or(trimmed);
    trimmed.to_string()
}
