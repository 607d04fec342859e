use crate::compat::String;

/// Errors that can occur while detecting URLs
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The scanner moved backwards more than the input can justify.
    /// Carries the text at the point where the limit tripped.
    #[error("Backtracked max amount of characters. Endless loop detected. Bad Text: '{text}'")]
    BacktrackLimit { text: String },

    /// `UrlSpan::create` found nothing in its input
    #[error("No url found in the input string")]
    NoUrlFound,

    /// `UrlSpan::create` found more than one candidate
    #[error("More than one url found in the input string")]
    MultipleUrlsFound,
}

/// Result type for URL detection operations
pub type Result<T> = core::result::Result<T, Error>;
