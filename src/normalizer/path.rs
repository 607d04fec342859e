use crate::compat::{String, ToString, Vec};
use crate::unicode::percent_encode::{percent_decode, percent_encode};

/// Resolve `.` and `..` segments and duplicate slashes in a path.
///
/// ```
/// use url_detector::normalize_path;
///
/// assert_eq!(normalize_path("/a/b/.//./../c"), "/a/c");
/// assert_eq!(normalize_path("/%7Euser/a b"), "/~user/a%20b");
/// ```
pub fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        return "/".to_string();
    }

    let decoded = percent_decode(path);
    percent_encode(&sanitize_dots_and_slashes(&decoded))
}

/// Keeps a stack of the slashes seen so far so that `..` can drop back to
/// the slash before the previous segment.
fn sanitize_dots_and_slashes(path: &str) -> String {
    let mut chars: Vec<char> = path.chars().collect();
    let mut slash_index_stack: Vec<usize> = Vec::new();
    let mut index: isize = 0;

    while index + 1 < chars.len() as isize {
        let i = index as usize;
        let len = chars.len();

        if chars[i] == '/' {
            slash_index_stack.push(i);

            if chars[i + 1] == '.' {
                if i + 2 < len && chars[i + 2] == '.' {
                    // "/../" or a trailing "/.."
                    if (i + 3 < len && chars[i + 3] == '/') || i + 3 == len {
                        let end_of_path = i + 3 == len;
                        slash_index_stack.pop();
                        let end_index = i + 3;

                        // Step back so the previous slash is looked at again
                        index = slash_index_stack
                            .pop()
                            .map_or(-1, |slash| slash as isize - 1);
                        let start_index = if end_of_path { index + 1 } else { index };
                        chars.drain((start_index + 1) as usize..end_index);
                    }
                } else if (i + 2 < len && chars[i + 2] == '/') || i + 2 == len {
                    // "/./" or a trailing "/."
                    let end_of_path = i + 2 == len;
                    slash_index_stack.pop();
                    let start_index = if end_of_path { i + 1 } else { i };
                    chars.drain(start_index..i + 2);
                    index -= 1;
                }
            } else if chars[i + 1] == '/' {
                slash_index_stack.pop();
                chars.remove(i);
                index -= 1;
            }
        }
        index += 1;
    }

    if chars.is_empty() {
        return "/".to_string();
    }
    chars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_segments() {
        assert_eq!(normalize_path("/a/b/.//./../c"), "/a/c");
        assert_eq!(normalize_path("/a/./b"), "/a/b");
        assert_eq!(normalize_path("/a/b/../c"), "/a/c");
        assert_eq!(normalize_path("/a/b/../../c"), "/c");
    }

    #[test]
    fn test_trailing_dots() {
        assert_eq!(normalize_path("/a/.."), "/");
        assert_eq!(normalize_path("/a/b/.."), "/a/");
        assert_eq!(normalize_path("/a/."), "/a/");
        assert_eq!(normalize_path("/.."), "/");
    }

    #[test]
    fn test_above_root() {
        assert_eq!(normalize_path("/../a"), "/a");
    }

    #[test]
    fn test_slashes() {
        assert_eq!(normalize_path("//a///b"), "/a/b");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/"), "/");
    }

    #[test]
    fn test_encoding() {
        assert_eq!(normalize_path("/a%2fb"), "/a/b");
        assert_eq!(normalize_path("/a b#c"), "/a%20b%23c");
        assert_eq!(normalize_path("/%2e%2e/a"), "/a");
    }

    #[test]
    fn test_dotted_names_are_kept() {
        assert_eq!(normalize_path("/.hidden/file.txt"), "/.hidden/file.txt");
        assert_eq!(normalize_path("/a/..b"), "/a/..b");
    }
}
