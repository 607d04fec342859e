use super::character_match::CharacterObserver;
use super::input_reader::InputReader;
use super::state::ReaderNextState;
use crate::character_sets::{
    INTERNATIONAL_CHAR_START, is_alpha, is_alpha_numeric, is_dot, is_encoded_dot, is_hex,
    is_numeric,
};
use crate::compat::{String, Vec};
use crate::error::Result;
use crate::ipv4::is_valid_ipv4;
use crate::ipv6::is_valid_ipv6;
use crate::options::DetectorOptions;
use crate::unicode::idna::is_punycode_prefix;

/// Longest allowed label
const MAX_LABEL_LENGTH: usize = 64;

/// Most labels a domain can have
const MAX_NUMBER_LABELS: usize = 127;

/// Longest allowed domain, counting the implied trailing dot
const MAX_DOMAIN_LENGTH: usize = 255;

/// Bounds on the length of the top-level label (`xn--` labels are exempt)
const MIN_TOP_LEVEL_DOMAIN: usize = 2;
const MAX_TOP_LEVEL_DOMAIN: usize = 22;

/// Reads a domain name or IP literal from the input, appending what it
/// accepts to the detector's buffer.
///
/// The buffer may already end with part of the domain (`current`), carried
/// over from whatever the detector buffered before it recognised a domain.
/// All counters below describe the domain being read and are discarded with
/// the reader.
pub struct DomainNameReader<'a> {
    reader: &'a mut InputReader,
    buffer: &'a mut Vec<char>,
    /// Start of the carried-over prefix in `buffer`, if any
    current: Option<usize>,
    options: DetectorOptions,
    observer: &'a mut dyn CharacterObserver,

    dots: usize,
    current_label_length: usize,
    top_level_length: usize,
    start_domain_name: usize,
    /// Only digits, dots and a hex prefix so far
    numeric: bool,
    seen_bracket: bool,
    seen_complete_bracket_set: bool,
    /// Inside the zone index of an IPv6 literal; dots are not counted
    zone_index: bool,
}

impl<'a> DomainNameReader<'a> {
    pub fn new(
        reader: &'a mut InputReader,
        buffer: &'a mut Vec<char>,
        current: Option<usize>,
        options: DetectorOptions,
        observer: &'a mut dyn CharacterObserver,
    ) -> Self {
        Self {
            reader,
            buffer,
            current,
            options,
            observer,
            dots: 0,
            current_label_length: 0,
            top_level_length: 0,
            start_domain_name: 0,
            numeric: true,
            seen_bracket: false,
            seen_complete_bracket_set: false,
            zone_index: false,
        }
    }

    fn allow_single_level(&self) -> bool {
        self.options.contains(DetectorOptions::ALLOW_SINGLE_LEVEL_DOMAIN)
    }

    /// Account for the carried-over prefix.
    ///
    /// An invalid character restarts the domain right after it, e.g. in
    /// `asdf%asdf.example.com` the domain becomes `asdf.example.com`.
    fn read_current(&mut self) -> ReaderNextState {
        let Some(start) = self.current else {
            self.start_domain_name = self.buffer.len();
            return ReaderNextState::ValidDomainName;
        };

        let current: Vec<char> = self.buffer[start..].to_vec();
        let length = current.len();

        // ".hello" or "%2ehello"
        if (length == 1 && is_dot(current[0]))
            || (length == 3 && current[0] == '%' && is_encoded_dot(current[1], current[2]))
        {
            return ReaderNextState::InvalidDomainName;
        }

        self.start_domain_name = start;
        self.numeric = true;

        // Restart point after the last invalid character
        let mut new_start = 0;

        let mut is_all_hex_so_far =
            length > 2 && current[0] == '0' && matches!(current[1], 'x' | 'X');
        let mut index = if is_all_hex_so_far { 2 } else { 0 };

        while index < length {
            let curr = current[index];
            self.current_label_length += 1;
            self.top_level_length = self.current_label_length;

            if self.current_label_length > MAX_LABEL_LENGTH {
                return ReaderNextState::InvalidDomainName;
            } else if is_dot(curr) {
                self.dots += 1;
                self.current_label_length = 0;
            } else if curr == '[' {
                self.seen_bracket = true;
                self.numeric = false;
            } else if curr == '%'
                && index + 2 < length
                && is_hex(current[index + 1])
                && is_hex(current[index + 2])
            {
                if is_encoded_dot(current[index + 1], current[index + 2]) {
                    self.dots += 1;
                    self.current_label_length = 0;
                } else {
                    self.numeric = false;
                }
                index += 2;
            } else if is_all_hex_so_far {
                if !is_hex(curr) {
                    // Rerun this character knowing the hex prefix is over
                    self.numeric = false;
                    is_all_hex_so_far = false;
                    continue;
                }
            } else if is_alpha(curr) || curr == '-' || curr >= INTERNATIONAL_CHAR_START {
                self.numeric = false;
            } else if !is_numeric(curr) && !self.allow_single_level() {
                new_start = index + 1;
                self.current_label_length = 0;
                self.top_level_length = 0;
                self.numeric = true;
                self.dots = 0;
            }
            index += 1;
        }

        if new_start > 0 {
            // The last character was the invalid one
            if new_start >= length {
                return ReaderNextState::InvalidDomainName;
            }
            self.buffer.drain(start..start + new_start);
            if self.buffer[start..] == ['.'] {
                return ReaderNextState::InvalidDomainName;
            }
        }

        ReaderNextState::ValidDomainName
    }

    /// Read the rest of the domain name and decide where the detector goes next.
    pub fn read_domain_name(mut self) -> Result<ReaderNextState> {
        if self.read_current() == ReaderNextState::InvalidDomainName {
            return Ok(ReaderNextState::InvalidDomainName);
        }

        while let Some(curr) = self.reader.read() {
            if curr == '/' {
                return self.check_domain_name_valid(ReaderNextState::ReadPath, Some(curr));
            } else if curr == ':' && (!self.seen_bracket || self.seen_complete_bracket_set) {
                // Not a port while inside an IPv6 literal
                return self.check_domain_name_valid(ReaderNextState::ReadPort, Some(curr));
            } else if curr == '?' {
                return self.check_domain_name_valid(ReaderNextState::ReadQueryString, Some(curr));
            } else if curr == '#' {
                return self.check_domain_name_valid(ReaderNextState::ReadFragment, Some(curr));
            } else if is_dot(curr)
                || (curr == '%'
                    && matches!(
                        (self.reader.peek_char(0), self.reader.peek_char(1)),
                        (Some(first), Some(second)) if is_encoded_dot(first, second)
                    ))
            {
                // "hello.." ends the domain
                if self.current_label_length < 1 {
                    break;
                }

                self.buffer.push(curr);
                if !is_dot(curr) {
                    self.read_into_buffer(2);
                }

                if self.current_label_length >= MAX_LABEL_LENGTH {
                    return Ok(ReaderNextState::InvalidDomainName);
                }

                if !self.zone_index {
                    self.dots += 1;
                }
                self.current_label_length = 0;
            } else if self.seen_bracket
                && !self.seen_complete_bracket_set
                && (is_hex(curr) || matches!(curr, ':' | '[' | ']' | '%'))
            {
                match curr {
                    ':' => self.current_label_length = 0,
                    '[' => {
                        // A second '[': restart from this bracket
                        self.reader.go_back()?;
                        return Ok(ReaderNextState::InvalidDomainName);
                    }
                    ']' => {
                        self.seen_complete_bracket_set = true;
                        self.zone_index = false;
                    }
                    '%' => self.zone_index = true,
                    _ => self.current_label_length += 1,
                }
                self.numeric = false;
                self.buffer.push(curr);
            } else if is_alpha_numeric(curr) || curr == '-' || curr >= INTERNATIONAL_CHAR_START {
                if self.seen_complete_bracket_set {
                    // "[fe80::]www.example.com"
                    self.reader.go_back()?;
                    break;
                }

                // 'x' may belong to a hex IP like 0xC0A80101
                if curr != 'x' && curr != 'X' && !is_numeric(curr) {
                    self.numeric = false;
                }

                self.buffer.push(curr);
                self.current_label_length += 1;
                self.top_level_length = self.current_label_length;
            } else if curr == '[' && !self.seen_bracket {
                self.seen_bracket = true;
                self.numeric = false;
                self.buffer.push(curr);
            } else if curr == '[' && self.seen_complete_bracket_set {
                // "[::][..."
                self.reader.go_back()?;
                break;
            } else if curr == '%' && self.reader.peek_hex_pair() {
                self.buffer.push(curr);
                self.read_into_buffer(2);
                self.current_label_length += 3;
                self.top_level_length = self.current_label_length;
            } else {
                // Let the detector keep its quote and bracket counts
                self.observer.observe(curr);
                break;
            }
        }

        self.check_domain_name_valid(ReaderNextState::ValidDomainName, None)
    }

    fn read_into_buffer(&mut self, count: usize) {
        for _ in 0..count {
            if let Some(c) = self.reader.read() {
                self.buffer.push(c);
            }
        }
    }

    /// Validate the whole domain read so far.
    ///
    /// On success `last_char` is appended and `valid_state` returned; on
    /// failure the reader steps back one character.
    fn check_domain_name_valid(
        &mut self,
        valid_state: ReaderNextState,
        last_char: Option<char>,
    ) -> Result<ReaderNextState> {
        let len = self.buffer.len();

        // The trailing dot is usually left out of the URL, count it anyway
        let last_dot_length = if len > 3
            && self.buffer[len - 3] == '%'
            && is_encoded_dot(self.buffer[len - 2], self.buffer[len - 1])
        {
            3
        } else {
            1
        };
        let has_partial_label = self.current_label_length > 0;
        let domain_length =
            len - self.start_domain_name + if has_partial_label { last_dot_length } else { 0 };
        let label_count = self.dots + usize::from(has_partial_label);

        let valid = if domain_length >= MAX_DOMAIN_LENGTH || label_count > MAX_NUMBER_LABELS {
            false
        } else if self.numeric {
            is_valid_ipv4(&self.test_domain(), self.dots)
        } else if self.seen_bracket {
            is_valid_ipv6(&self.test_domain())
        } else if (has_partial_label && self.dots >= 1)
            || (self.dots >= 2 && !has_partial_label)
            || (self.allow_single_level() && self.dots == 0)
        {
            let mut top_start = len.saturating_sub(self.top_level_length);
            if !has_partial_label {
                top_start = top_start.saturating_sub(1);
            }
            let top_level_start: String = self.buffer[top_start..].iter().take(4).collect();

            // No size restriction on internationalized top-level labels
            is_punycode_prefix(top_level_start.as_bytes())
                || (MIN_TOP_LEVEL_DOMAIN..=MAX_TOP_LEVEL_DOMAIN).contains(&self.top_level_length)
        } else {
            false
        };

        if valid {
            if let Some(c) = last_char {
                self.buffer.push(c);
            }
            return Ok(valid_state);
        }

        // Roll back one character so "00:41.<br />" can still be read from '<'
        self.reader.go_back()?;
        Ok(ReaderNextState::InvalidDomainName)
    }

    fn test_domain(&self) -> String {
        self.buffer[self.start_domain_name..]
            .iter()
            .map(char::to_ascii_lowercase)
            .collect()
    }
}
