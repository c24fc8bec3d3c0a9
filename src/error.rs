use std::fmt;

/// Reasons the serialized `digest|salt` text cannot be parsed.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The text contains no separator at all.
    MissingSeparator,
    /// The digest segment before the separator is empty.
    EmptyDigest,
    /// The salt segment after the separator is empty.
    EmptySalt,
    /// A segment is not valid standard base64.
    InvalidBase64(base64::DecodeError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingSeparator => write!(f, "missing separator"),
            ParseError::EmptyDigest => write!(f, "empty digest segment"),
            ParseError::EmptySalt => write!(f, "empty salt segment"),
            ParseError::InvalidBase64(e) => write!(f, "invalid base64: {e}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::InvalidBase64(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors produced when deriving or reconstructing a hashed secret.
#[derive(Debug)]
pub enum HashError {
    /// A derivation parameter is out of range; never clamped silently.
    InvalidParameter(&'static str),
    /// The OS random generator is unavailable.
    RandomUnavailable,
    /// The serialized text is malformed.
    Parse(ParseError),
}

impl fmt::Display for HashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashError::InvalidParameter(what) => write!(f, "invalid parameter: {what}"),
            HashError::RandomUnavailable => write!(f, "OS random generator unavailable"),
            HashError::Parse(e) => write!(f, "parse failed: {e}"),
        }
    }
}

impl std::error::Error for HashError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HashError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for HashError {
    fn from(e: ParseError) -> Self {
        HashError::Parse(e)
    }
}
