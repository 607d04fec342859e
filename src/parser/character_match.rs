use super::state::CharacterMatch;
use crate::options::DetectorOptions;

/// Receives characters that end a domain name so that quote and bracket
/// counts stay accurate while the domain reader is in control.
pub trait CharacterObserver {
    fn observe(&mut self, character: char);
}

/// Characters whose occurrences are counted
const MATCHED_CHARACTERS: [char; 10] = ['"', '\'', '[', '{', '(', '<', ']', '}', ')', '>'];

/// Quote, bracket and tag counters for one scan of one input.
///
/// Counts persist for the whole scan; the quote flags are reset every time
/// a candidate ends.
#[derive(Debug, Clone)]
pub struct CharacterMatcher {
    options: DetectorOptions,
    counts: [usize; MATCHED_CHARACTERS.len()],
    quote_start: bool,
    single_quote_start: bool,
}

impl CharacterMatcher {
    pub fn new(options: DetectorOptions) -> Self {
        Self {
            options,
            counts: [0; MATCHED_CHARACTERS.len()],
            quote_start: false,
            single_quote_start: false,
        }
    }

    /// Whether a double quote was seen since the last candidate ended
    pub fn quote_start(&self) -> bool {
        self.quote_start
    }

    pub fn reset_quotes(&mut self) {
        self.quote_start = false;
        self.single_quote_start = false;
    }

    fn count(&self, character: char) -> usize {
        MATCHED_CHARACTERS
            .iter()
            .position(|&c| c == character)
            .map_or(0, |slot| self.counts[slot])
    }

    fn increment(&mut self, character: char) -> usize {
        match MATCHED_CHARACTERS.iter().position(|&c| c == character) {
            Some(slot) => {
                self.counts[slot] += 1;
                self.counts[slot]
            }
            None => 0,
        }
    }

    /// Classify `curr` against the enabled matching options, updating counts.
    pub fn check(&mut self, curr: char) -> CharacterMatch {
        let options = self.options;

        if (curr == '"' && options.contains(DetectorOptions::QUOTE_MATCH))
            || (curr == '\'' && options.contains(DetectorOptions::SINGLE_QUOTE_MATCH))
        {
            let quote_start = if curr == '"' {
                core::mem::replace(&mut self.quote_start, true)
            } else {
                core::mem::replace(&mut self.single_quote_start, true)
            };

            // A quote was already open, or this one pairs up with an earlier one
            let count = self.increment(curr);
            return if quote_start || count % 2 == 0 {
                CharacterMatch::MatchStop
            } else {
                CharacterMatch::MatchStart
            };
        }

        let brackets = options.contains(DetectorOptions::BRACKET_MATCH);
        let tags = options.contains(DetectorOptions::TAG_MATCH);

        if (brackets && matches!(curr, '[' | '{' | '(')) || (tags && curr == '<') {
            self.increment(curr);
            return CharacterMatch::MatchStart;
        }

        if (brackets && matches!(curr, ']' | '}' | ')')) || (tags && curr == '>') {
            let closed = self.increment(curr);
            let opening = match curr {
                ']' => '[',
                '}' => '{',
                ')' => '(',
                _ => '<',
            };

            // Only a stop if it closes something that is still open
            return if self.count(opening) >= closed {
                CharacterMatch::MatchStop
            } else {
                CharacterMatch::MatchStart
            };
        }

        CharacterMatch::NotMatched
    }
}

impl CharacterObserver for CharacterMatcher {
    fn observe(&mut self, character: char) {
        self.check(character);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmatched_without_options() {
        let mut matcher = CharacterMatcher::new(DetectorOptions::default());
        for c in ['"', '\'', '(', ')', '<', '>', 'a'] {
            assert_eq!(matcher.check(c), CharacterMatch::NotMatched);
        }
    }

    #[test]
    fn test_quotes() {
        let mut matcher = CharacterMatcher::new(DetectorOptions::QUOTE_MATCH);
        assert_eq!(matcher.check('"'), CharacterMatch::MatchStart);
        assert!(matcher.quote_start());
        assert_eq!(matcher.check('"'), CharacterMatch::MatchStop);

        matcher.reset_quotes();
        // Third quote: odd count, no quote open
        assert_eq!(matcher.check('"'), CharacterMatch::MatchStart);
        // Single quotes are not matched with this option
        assert_eq!(matcher.check('\''), CharacterMatch::NotMatched);
    }

    #[test]
    fn test_quote_even_count_stops() {
        let mut matcher = CharacterMatcher::new(DetectorOptions::SINGLE_QUOTE_MATCH);
        assert_eq!(matcher.check('\''), CharacterMatch::MatchStart);
        matcher.reset_quotes();
        assert_eq!(matcher.check('\''), CharacterMatch::MatchStop);
    }

    #[test]
    fn test_brackets() {
        let mut matcher = CharacterMatcher::new(DetectorOptions::BRACKET_MATCH);
        assert_eq!(matcher.check('('), CharacterMatch::MatchStart);
        assert_eq!(matcher.check('('), CharacterMatch::MatchStart);
        assert_eq!(matcher.check(')'), CharacterMatch::MatchStop);
        assert_eq!(matcher.check(')'), CharacterMatch::MatchStop);
        // Nothing left to close
        assert_eq!(matcher.check(')'), CharacterMatch::MatchStart);
        assert_eq!(matcher.check(']'), CharacterMatch::MatchStart);
        assert_eq!(matcher.check('<'), CharacterMatch::NotMatched);
    }

    #[test]
    fn test_tags() {
        let mut matcher = CharacterMatcher::new(DetectorOptions::TAG_MATCH);
        assert_eq!(matcher.check('>'), CharacterMatch::MatchStart);
        assert_eq!(matcher.check('<'), CharacterMatch::MatchStart);
        assert_eq!(matcher.check('<'), CharacterMatch::MatchStart);
        assert_eq!(matcher.check('>'), CharacterMatch::MatchStop);
        assert_eq!(matcher.check('['), CharacterMatch::NotMatched);
    }
}
