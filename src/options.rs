use bitflags::bitflags;

bitflags! {
    /// Switches that change how the detector treats quotes, brackets and
    /// hosts without a dot.
    ///
    /// The individual bits can be combined freely; the associated presets
    /// cover the common content formats.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DetectorOptions: u32 {
        /// `"` opens and closes a candidate.
        const QUOTE_MATCH = 1;
        /// `'` opens and closes a candidate.
        const SINGLE_QUOTE_MATCH = 1 << 1;
        /// `[`, `{` and `(` are matched against their closing counterparts.
        const BRACKET_MATCH = 1 << 2;
        /// `<` is matched against `>`.
        const TAG_MATCH = 1 << 3;
        /// A `mailto:` prefix is never read as a scheme.
        const REJECT_MAILTO = 1 << 4;
        /// Accept hosts without any dot, e.g. `http://localhost`.
        const ALLOW_SINGLE_LEVEL_DOMAIN = 1 << 5;

        const JSON = Self::QUOTE_MATCH.bits() | Self::BRACKET_MATCH.bits();
        const JAVASCRIPT = Self::JSON.bits() | Self::SINGLE_QUOTE_MATCH.bits();
        const XML = Self::TAG_MATCH.bits() | Self::QUOTE_MATCH.bits();
        const HTML = Self::XML.bits()
            | Self::SINGLE_QUOTE_MATCH.bits()
            | Self::REJECT_MAILTO.bits();
    }
}
