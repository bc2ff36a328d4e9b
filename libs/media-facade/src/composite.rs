use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Separator joining the CDN identifier to the original upload reference.
pub const COMPOSITE_SEPARATOR: char = '#';

/// Identifier pairing the CDN-assigned id with the reference that was
/// uploaded, so the client-side fallback script can recover the storage URL
/// from a broken image source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeId {
    public_id: String,
    origin: String,
}

impl CompositeId {
    pub fn new(public_id: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            public_id: public_id.into(),
            origin: origin.into(),
        }
    }

    /// CDN-assigned identifier (the part before the separator).
    pub fn public_id(&self) -> &str {
        &self.public_id
    }

    /// Originally uploaded reference (the part after the separator).
    pub fn origin(&self) -> &str {
        &self.origin
    }
}

impl fmt::Display for CompositeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.public_id, COMPOSITE_SEPARATOR, self.origin)
    }
}

/// The input had no separator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("composite identifier is missing the '#' separator")]
pub struct ParseCompositeIdError;

impl FromStr for CompositeId {
    type Err = ParseCompositeIdError;

    /// Splits on the first separator. A separator inside the origin stays
    /// part of the origin, which is how the client script reads the value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(COMPOSITE_SEPARATOR) {
            Some((public_id, origin)) => Ok(Self::new(public_id, origin)),
            None => Err(ParseCompositeIdError),
        }
    }
}
