/// Schemes the detector knows default ports for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemeType {
    #[default]
    Http,
    Https,
    Ftp,
    Ftps,
    Other,
}

impl SchemeType {
    /// Get the default port for this scheme
    pub fn default_port(self) -> Option<u16> {
        match self {
            Self::Http => Some(80),
            Self::Https => Some(443),
            Self::Ftp => Some(21),
            Self::Ftps | Self::Other => None,
        }
    }
}
