/// Outcome of reading a domain name: where the detector goes next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderNextState {
    /// Not a domain name or IP literal
    InvalidDomainName,
    /// A complete domain name; the URL ends here
    ValidDomainName,
    /// Valid domain name followed by '#'
    ReadFragment,
    /// Valid domain name followed by '/'
    ReadPath,
    /// Valid domain name followed by ':'
    ReadPort,
    /// Valid domain name followed by '?'
    ReadQueryString,
}

/// How a quote, bracket or tag character relates to the current candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterMatch {
    /// Not a character being matched
    NotMatched,
    /// Closes a matched range
    MatchStop,
    /// Opens a range, or closes nothing
    MatchStart,
}

/// How a candidate ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadEndState {
    ValidUrl,
    InvalidUrl,
}
