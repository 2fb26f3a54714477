use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use super::sanitize;
use crate::error::{Error, ErrorKind};

/// A credited person on an issue or story.
///
/// Equality (and hashing) covers every field, which makes the whole value
/// the deduplication key for credit lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct Creator {
    pub name: String,
    /// Credited role, e.g. "Writer" or "Cover Artist"
    pub role: String,
    /// Absolute URL of the creator's page
    pub url: String,
    /// Which credits section the entry came from
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub source: CreatorSource,
}

/// The credits section a [`Creator`] was listed under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum CreatorSource {
    /// Interior story credits
    #[default]
    Creator,
    /// Cover credits
    Cover,
    /// Editorial and production staff
    Production,
}
impl CreatorSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreatorSource::Creator => "creator",
            CreatorSource::Cover => "cover",
            CreatorSource::Production => "production",
        }
    }
}
impl FromStr for CreatorSource {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match sanitize(s).as_str() {
            "creator" | "creators" | "story" => Self::Creator,
            "cover" | "covers" => Self::Cover,
            "production" => Self::Production,
            _ => exn::bail!(ErrorKind::ParseError {
                field: "creator_source",
                value: s.to_string(),
            }),
        })
    }
}
impl Display for CreatorSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
