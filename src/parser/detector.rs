use super::character_match::CharacterMatcher;
use super::domain_reader::DomainNameReader;
use super::input_reader::InputReader;
use super::state::{CharacterMatch, ReadEndState, ReaderNextState};
use crate::character_sets::{is_alpha, is_dot, is_numeric};
use crate::compat::Vec;
use crate::error::Result;
use crate::options::DetectorOptions;
use crate::scheme::{HTML_MAILTO, ends_with_ignore_case, find_scheme_start};
use crate::url_base::UrlBase;
use crate::url_components::{UrlComponents, UrlPart};
use crate::url_span::UrlSpan;

/// Scans a piece of text and extracts every URL in it.
///
/// The detector makes a single forward pass, buffering characters that may
/// belong to a URL and handing control to smaller readers (scheme, user
/// info, domain, port, path, query, fragment) once the buffer looks like
/// the start of one. Readers that give up move the input back so the text
/// can be rescanned from a safer point.
///
/// # Examples
///
/// ```
/// use url_detector::{DetectorOptions, UrlBase, UrlDetector};
///
/// let mut detector = UrlDetector::new("see www.example.com/docs", DetectorOptions::default());
/// let urls = detector.detect().unwrap();
/// assert_eq!(urls.len(), 1);
/// assert_eq!(urls[0].host(), "www.example.com");
/// assert_eq!(urls[0].path(), "/docs");
/// ```
#[derive(Debug)]
pub struct UrlDetector {
    reader: InputReader,
    options: DetectorOptions,
    /// Characters of the current candidate
    buffer: Vec<char>,
    /// A scheme, or an HTML5 root (`//`), was read for the current candidate
    has_scheme: bool,
    /// The last `[` failed as an IPv6 literal; count the next one before
    /// trying again
    dont_match_ipv6: bool,
    matcher: CharacterMatcher,
    marker: UrlComponents,
    urls: Vec<UrlSpan>,
}

impl UrlDetector {
    pub fn new(content: &str, options: DetectorOptions) -> Self {
        Self {
            reader: InputReader::new(content),
            options,
            buffer: Vec::new(),
            has_scheme: false,
            dont_match_ipv6: false,
            matcher: CharacterMatcher::new(options),
            marker: UrlComponents::new(),
            urls: Vec::new(),
        }
    }

    /// Run the scan and return every URL found, in order of appearance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BacktrackLimit`](crate::Error::BacktrackLimit) when
    /// the input makes the detector move backwards too often.
    pub fn detect(&mut self) -> Result<Vec<UrlSpan>> {
        self.read_default()?;
        tracing::debug!(
            urls = self.urls.len(),
            backtracked = self.reader.backtracked(),
            "scan finished"
        );
        Ok(core::mem::take(&mut self.urls))
    }

    /// Number of characters the scan has moved backwards so far
    pub fn backtracked(&self) -> usize {
        self.reader.backtracked()
    }

    fn allow_single_level(&self) -> bool {
        self.options.contains(DetectorOptions::ALLOW_SINGLE_LEVEL_DOMAIN)
    }

    fn read_into_buffer(&mut self, count: usize) {
        for _ in 0..count {
            if let Some(c) = self.reader.read() {
                self.buffer.push(c);
            }
        }
    }

    /// Top-level loop. `length` is where the text that may still become a
    /// domain starts in the buffer.
    fn read_default(&mut self) -> Result<()> {
        let mut length = 0;

        while let Some(curr) = self.reader.read() {
            match curr {
                ' ' => {
                    // "http://localhost " with single level domains
                    if self.allow_single_level() && !self.buffer.is_empty() && self.has_scheme {
                        self.reader.go_back()?;
                        self.read_domain_name(Some(length))?;
                    }
                    self.buffer.push(curr);
                    self.read_end(ReadEndState::InvalidUrl);
                    length = 0;
                }
                '%' if self.reader.peek_eq_ignore_case("3a") => {
                    self.buffer.push(curr);
                    self.read_into_buffer(2);
                    length = self.process_colon(length)?;
                }
                '%' if self.reader.peek_hex_pair() => {
                    self.buffer.push(curr);
                    self.read_into_buffer(2);
                    self.read_domain_name(Some(length))?;
                    length = 0;
                }
                '@' if !self.buffer.is_empty() => {
                    self.marker.set_index(UrlPart::UsernamePassword, length);
                    self.buffer.push(curr);
                    self.read_domain_name(None)?;
                    length = 0;
                }
                '[' => {
                    // After a failed literal, a bracket may still open or close a range
                    if self.dont_match_ipv6
                        && self.matcher.check(curr) != CharacterMatch::NotMatched
                    {
                        self.read_end(ReadEndState::InvalidUrl);
                        length = 0;
                    }
                    let beginning = self.reader.position();

                    if !self.has_scheme {
                        self.buffer.clear();
                        length = 0;
                    }
                    self.buffer.push(curr);

                    if !self.read_domain_name(Some(length))? {
                        // Rescan what follows the bracket as ordinary text
                        self.reader.seek(beginning)?;
                        self.dont_match_ipv6 = true;
                    }
                    length = 0;
                }
                '/' => {
                    if self.has_scheme || (self.allow_single_level() && self.buffer.len() > 1) {
                        // "http://123123123/" or "localhost/": the domain ends here
                        self.reader.go_back()?;
                        self.read_domain_name(Some(length))?;
                        length = 0;
                    } else {
                        // Maybe an HTML5 root such as "//example.com/"
                        self.read_end(ReadEndState::InvalidUrl);
                        self.buffer.push(curr);
                        self.has_scheme = self.read_html5_root()?;
                        length = self.buffer.len();
                    }
                }
                ':' => {
                    self.buffer.push(curr);
                    length = self.process_colon(length)?;
                }
                c if is_dot(c) => {
                    self.buffer.push(c);
                    self.read_domain_name(Some(length))?;
                    length = 0;
                }
                _ => {
                    if self.matcher.check(curr) == CharacterMatch::NotMatched {
                        self.buffer.push(curr);
                    } else {
                        self.read_end(ReadEndState::InvalidUrl);
                        length = 0;
                    }
                }
            }
        }

        // "http://localhost" at the very end of the input
        if self.allow_single_level() && !self.buffer.is_empty() && self.has_scheme {
            self.read_domain_name(Some(length))?;
        }

        Ok(())
    }

    /// A colon was just buffered: it may end a scheme, separate a username
    /// from a password, or precede a port. Returns the new `length`.
    fn process_colon(&mut self, length: usize) -> Result<usize> {
        if self.has_scheme {
            if self.read_user_pass(length)? {
                return Ok(0);
            }
            if self.buffer.is_empty() {
                return Ok(length);
            }

            // Unread the colon so the domain reader sees the port
            let colon_length = self.colon_length();
            self.reader
                .seek(self.reader.position().saturating_sub(colon_length))?;
            self.buffer.truncate(self.buffer.len() - colon_length);

            let backtrack_on_fail =
                (self.reader.position() + length).saturating_sub(self.buffer.len());
            if !self.read_domain_name(Some(length))? {
                self.reader.seek(backtrack_on_fail)?;
                self.read_end(ReadEndState::InvalidUrl);
            }
            Ok(0)
        } else if self.read_scheme()? && !self.buffer.is_empty() {
            self.has_scheme = true;
            Ok(self.buffer.len())
        } else if self.allow_single_level() && self.has_host_before_colon() && !self.reader.eof() {
            // "localhost:8080"; a bare colon is never a host
            let colon_length = self.colon_length();
            self.reader
                .seek(self.reader.position().saturating_sub(colon_length))?;
            self.buffer.truncate(self.buffer.len() - colon_length);
            self.read_domain_name(Some(0))?;
            Ok(0)
        } else {
            self.read_end(ReadEndState::InvalidUrl);
            Ok(0)
        }
    }

    /// The buffer still ends with the colon and has text in front of it
    fn has_host_before_colon(&self) -> bool {
        let ends_with_colon =
            self.buffer.last() == Some(&':') || ends_with_ignore_case(&self.buffer, "%3a");
        ends_with_colon && self.buffer.len() > self.colon_length()
    }

    /// Width of the colon at the end of the buffer, `:` or `%3a`
    fn colon_length(&self) -> usize {
        if ends_with_ignore_case(&self.buffer, "%3a") {
            3
        } else {
            1
        }
    }

    /// Try to complete a scheme such as `http://` from the buffered text.
    fn read_scheme(&mut self) -> Result<bool> {
        if self.options.contains(DetectorOptions::REJECT_MAILTO)
            && ends_with_ignore_case(&self.buffer, HTML_MAILTO)
        {
            return Ok(self.read_end(ReadEndState::InvalidUrl));
        }

        let original_length = self.buffer.len();
        let mut num_slashes = 0;

        while let Some(curr) = self.reader.read() {
            if curr == '/' {
                self.buffer.push(curr);
                if num_slashes == 1 {
                    let Some(start) = find_scheme_start(&self.buffer) else {
                        return Ok(false);
                    };
                    // Drop text glued in front of the scheme, e.g. "(http://"
                    self.buffer.drain(..start);
                    self.marker = UrlComponents::new();
                    self.marker.set_index(UrlPart::Scheme, 0);
                    return Ok(true);
                }
                num_slashes += 1;
            } else if curr == ' ' || self.matcher.check(curr) != CharacterMatch::NotMatched {
                self.buffer.push(curr);
                return Ok(false);
            } else if curr == '[' {
                // Let the top-level loop try an IPv6 literal
                self.reader.go_back()?;
                return Ok(false);
            } else if original_length > 0 || num_slashes > 0 || !is_alpha(curr) {
                // Probably "user:password@"
                self.reader.go_back()?;
                return self.read_user_pass(0);
            }
        }

        Ok(false)
    }

    /// Read the rest of `user:password@`. On failure without a clear end
    /// the input is rolled back to where the password started.
    fn read_user_pass(&mut self, beginning_of_username: usize) -> Result<bool> {
        let start = self.buffer.len();
        let mut done = false;
        // A dot may mean this was "host:port.something" after all
        let mut rollback = false;

        while !done {
            let Some(curr) = self.reader.read() else {
                break;
            };

            if curr == '@' {
                self.buffer.push(curr);
                self.marker.set_index(UrlPart::UsernamePassword, beginning_of_username);
                let host_start = self.buffer.len();
                return self.read_domain_name(Some(host_start));
            } else if is_dot(curr) || curr == '[' {
                self.buffer.push(curr);
                rollback = true;
            } else if matches!(curr, '#' | ' ' | '/')
                || self.matcher.check(curr) != CharacterMatch::NotMatched
            {
                rollback = true;
                done = true;
            } else {
                self.buffer.push(curr);
            }
        }

        if rollback {
            let distance = self.buffer.len() - start;
            self.buffer.truncate(start);
            let position = self
                .reader
                .position()
                .saturating_sub(distance + usize::from(done));
            self.reader.seek(position)?;
            return Ok(false);
        }

        Ok(self.read_end(ReadEndState::InvalidUrl))
    }

    /// The buffer holds one `/`; a second one makes an HTML5 root.
    fn read_html5_root(&mut self) -> Result<bool> {
        let Some(curr) = self.reader.read() else {
            return Ok(false);
        };

        if curr == '/' {
            self.buffer.push(curr);
            return Ok(true);
        }

        self.reader.go_back()?;
        self.read_end(ReadEndState::InvalidUrl);
        Ok(false)
    }

    /// Read a domain starting at `current` in the buffer (or at the end of
    /// the buffer when `None`) and continue with whatever follows it.
    fn read_domain_name(&mut self, current: Option<usize>) -> Result<bool> {
        let current = current.map(|start| start.min(self.buffer.len()));
        let host_index = current.unwrap_or(self.buffer.len());
        self.marker.set_index(UrlPart::Host, host_index);

        let state = DomainNameReader::new(
            &mut self.reader,
            &mut self.buffer,
            current,
            self.options,
            &mut self.matcher,
        )
        .read_domain_name()?;

        match state {
            ReaderNextState::ValidDomainName => Ok(self.read_end(ReadEndState::ValidUrl)),
            ReaderNextState::ReadFragment => Ok(self.read_fragment()),
            ReaderNextState::ReadPath => Ok(self.read_path()),
            ReaderNextState::ReadPort => self.read_port(),
            ReaderNextState::ReadQueryString => Ok(self.read_query_string()),
            ReaderNextState::InvalidDomainName => Ok(self.read_end(ReadEndState::InvalidUrl)),
        }
    }

    /// The buffer ends with `#`
    fn read_fragment(&mut self) -> bool {
        self.marker
            .set_index(UrlPart::Fragment, self.buffer.len() - 1);

        while let Some(curr) = self.reader.read() {
            if curr == ' ' || self.matcher.check(curr) == CharacterMatch::MatchStop {
                break;
            }
            self.buffer.push(curr);
        }

        self.read_end(ReadEndState::ValidUrl)
    }

    /// The buffer ends with `?`
    fn read_query_string(&mut self) -> bool {
        self.marker.set_index(UrlPart::Query, self.buffer.len() - 1);

        while let Some(curr) = self.reader.read() {
            if curr == '#' {
                self.buffer.push(curr);
                return self.read_fragment();
            } else if curr == ' ' || self.matcher.check(curr) == CharacterMatch::MatchStop {
                break;
            }
            self.buffer.push(curr);
        }

        self.read_end(ReadEndState::ValidUrl)
    }

    /// The buffer ends with `:` after a valid host
    fn read_port(&mut self) -> Result<bool> {
        self.marker.set_index(UrlPart::Port, self.buffer.len());
        let mut port_length = 0;

        while let Some(curr) = self.reader.read() {
            port_length += 1;

            match curr {
                '/' => {
                    self.buffer.push(curr);
                    return Ok(self.read_path());
                }
                '?' => {
                    self.buffer.push(curr);
                    return Ok(self.read_query_string());
                }
                '#' => {
                    self.buffer.push(curr);
                    return Ok(self.read_fragment());
                }
                _ if self.matcher.check(curr) == CharacterMatch::MatchStop
                    || !is_numeric(curr) =>
                {
                    // The URL ends before this character
                    self.reader.go_back()?;

                    // "example.com:hello", no port at all
                    if port_length == 1 {
                        self.buffer.pop();
                        self.marker.unset_index(UrlPart::Port);
                    }
                    return Ok(self.read_end(ReadEndState::ValidUrl));
                }
                _ => self.buffer.push(curr),
            }
        }

        Ok(self.read_end(ReadEndState::ValidUrl))
    }

    /// The buffer ends with `/`
    fn read_path(&mut self) -> bool {
        self.marker.set_index(UrlPart::Path, self.buffer.len() - 1);

        while let Some(curr) = self.reader.read() {
            if curr == ' ' || self.matcher.check(curr) == CharacterMatch::MatchStop {
                break;
            }

            self.buffer.push(curr);
            if curr == '?' {
                return self.read_query_string();
            } else if curr == '#' {
                return self.read_fragment();
            }
        }

        self.read_end(ReadEndState::ValidUrl)
    }

    /// End the current candidate, keeping it if `state` is valid, and reset
    /// for the next one. Returns whether the candidate was kept.
    fn read_end(&mut self, state: ReadEndState) -> bool {
        if state == ReadEndState::ValidUrl && !self.buffer.is_empty() {
            // Opened by a quote, so a trailing quote closes it
            if self.matcher.quote_start() && self.buffer.last() == Some(&'"') {
                self.buffer.pop();
            }

            if !self.buffer.is_empty() {
                let url = UrlSpan::from_chars(&self.buffer, self.marker);
                tracing::debug!(url = url.original_url(), "url detected");
                self.urls.push(url);
            }
        } else if !self.buffer.is_empty() {
            tracing::trace!(length = self.buffer.len(), "candidate rejected");
        }

        self.buffer.clear();
        self.matcher.reset_quotes();
        self.has_scheme = false;
        self.dont_match_ipv6 = false;
        self.marker = UrlComponents::new();

        state == ReadEndState::ValidUrl
    }
}
