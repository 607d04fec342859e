use crate::character_sets::is_white_space;
use crate::compat::{String, Vec};
use crate::error::{Error, Result};

/// Minimum amount of text quoted when the backtrack limit trips
const MINIMUM_BACKTRACK_LENGTH: usize = 20;

/// Total backtracking allowed, as a multiple of the input length
const MAX_BACKTRACK_MULTIPLIER: usize = 10;

/// Character reader over an immutable input with bounded backtracking.
///
/// Every backwards move is accounted for; once the total exceeds
/// `MAX_BACKTRACK_MULTIPLIER` times the input length the move fails with
/// [`Error::BacktrackLimit`].
#[derive(Debug, Clone)]
pub struct InputReader {
    content: Vec<char>,
    index: usize,
    backtracked: usize,
}

impl InputReader {
    pub fn new(content: &str) -> Self {
        Self {
            content: content.chars().collect(),
            index: 0,
            backtracked: 0,
        }
    }

    /// Read the next character, turning any whitespace into a plain space
    pub fn read(&mut self) -> Option<char> {
        let chr = *self.content.get(self.index)?;
        self.index += 1;
        Some(if is_white_space(chr) { ' ' } else { chr })
    }

    /// Peek at the next `number_chars` characters without advancing
    pub fn peek(&self, number_chars: usize) -> Option<&[char]> {
        self.content.get(self.index..self.index + number_chars)
    }

    /// Character `offset` places after the current position
    pub fn peek_char(&self, offset: usize) -> Option<char> {
        self.content.get(self.index + offset).copied()
    }

    /// Check whether the next two characters equal `pair`, ignoring ASCII case
    pub fn peek_eq_ignore_case(&self, pair: &str) -> bool {
        self.peek(pair.chars().count()).is_some_and(|chars| {
            chars
                .iter()
                .zip(pair.chars())
                .all(|(a, b)| a.eq_ignore_ascii_case(&b))
        })
    }

    /// Check whether the next two characters form a hex escape body
    pub fn peek_hex_pair(&self) -> bool {
        matches!(
            (self.peek_char(0), self.peek_char(1)),
            (Some(high), Some(low)) if high.is_ascii_hexdigit() && low.is_ascii_hexdigit()
        )
    }

    pub fn can_read_chars(&self, number_chars: usize) -> bool {
        self.content.len() >= self.index + number_chars
    }

    pub fn eof(&self) -> bool {
        !self.can_read_chars(1)
    }

    pub fn position(&self) -> usize {
        self.index
    }

    /// Total number of characters moved backwards so far
    pub fn backtracked(&self) -> usize {
        self.backtracked
    }

    /// Move to an arbitrary position; moving backwards counts against the limit
    pub fn seek(&mut self, position: usize) -> Result<()> {
        let backtrack_length = self.index.saturating_sub(position);
        self.backtracked += backtrack_length;
        self.index = position.min(self.content.len());
        self.check_backtrack_loop(backtrack_length)
    }

    /// Step back a single character
    pub fn go_back(&mut self) -> Result<()> {
        self.backtracked += 1;
        self.index = self.index.saturating_sub(1);
        self.check_backtrack_loop(1)
    }

    fn check_backtrack_loop(&self, backtrack_length: usize) -> Result<()> {
        if self.backtracked <= self.content.len() * MAX_BACKTRACK_MULTIPLIER {
            return Ok(());
        }

        let length = backtrack_length
            .max(MINIMUM_BACKTRACK_LENGTH)
            .min(self.content.len() - self.index);
        let text: String = self.content[self.index..self.index + length].iter().collect();
        tracing::warn!(
            position = self.index,
            backtracked = self.backtracked,
            "backtrack limit reached"
        );

        Err(Error::BacktrackLimit { text })
    }
}
