//! Find URLs in free text the way a browser would read them.
//!
//! The detector accepts what browsers accept rather than what the RFCs
//! allow: hosts with full-width dots, IPv4 addresses in hex or octal,
//! bracketed IPv6 literals with zone indices, HTML5 protocol-relative
//! roots and percent-encoded separators.
//!
//! ```
//! use url_detector::{DetectorOptions, UrlBase, detect};
//!
//! let text = "Docs at https://example.com/guide and a mirror on 192.168.1.10";
//! let urls = detect(text, DetectorOptions::default()).unwrap();
//! assert_eq!(urls.len(), 2);
//! assert_eq!(urls[0].path(), "/guide");
//! assert_eq!(urls[1].host(), "192.168.1.10");
//!
//! let normalized = urls[0].normalize();
//! assert_eq!(normalized.full_url(), "https://example.com/guide");
//! ```
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Compatibility layer for std/no_std
mod compat;

// Internal modules (not public API)
mod character_sets;
mod checkers;
mod error;
mod helpers;
mod ipv4;
mod ipv6;
mod normalizer;
mod options;
mod parser;
mod scheme;
mod types;
mod unicode;
mod url_base;
mod url_components;
mod url_span;

// Public API
pub use error::{Error, Result};
pub use helpers::remove_extra_dots;
pub use normalizer::NormalizedUrl;
pub use normalizer::host::normalize_host;
pub use normalizer::path::normalize_path;
pub use options::DetectorOptions;
pub use parser::UrlDetector;
pub use unicode::percent_encode::{percent_decode, percent_encode};
pub use url_base::UrlBase;
pub use url_span::UrlSpan;

/// Detect every URL in `text`.
///
/// # Errors
///
/// Returns [`Error::BacktrackLimit`] when the input makes the detector
/// backtrack more than ten times its length.
#[tracing::instrument(level = "debug", skip_all, fields(len = text.len()))]
pub fn detect(text: &str, options: DetectorOptions) -> Result<compat::Vec<UrlSpan>> {
    UrlDetector::new(text, options).detect()
}
