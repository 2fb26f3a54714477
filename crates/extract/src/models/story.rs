use std::convert::Infallible;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use super::{Character, Creator, sanitize};

/// A single story (or other feature) contained in an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct Story {
    pub title: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: StoryKind,
    pub pages: Option<u32>,
    /// Credits scoped to this story only
    pub creators: Vec<Creator>,
    /// Characters scoped to this story only
    pub characters: Vec<Character>,
}

/// Closed set of story types; anything unrecognised maps to [`Unknown`](Self::Unknown).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum StoryKind {
    Story,
    Cover,
    PinUp,
    Letters,
    TextStory,
    Preview,
    #[default]
    Unknown,
}
impl StoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryKind::Story => "Story",
            StoryKind::Cover => "Cover",
            StoryKind::PinUp => "Pin-Up",
            StoryKind::Letters => "Letters",
            StoryKind::TextStory => "Text Story",
            StoryKind::Preview => "Preview",
            StoryKind::Unknown => "Unknown",
        }
    }
}
impl FromStr for StoryKind {
    type Err = Infallible;
    /// Matches by keyword, most specific first: "Text Story" is a
    /// [`TextStory`](Self::TextStory), not a [`Story`](Self::Story).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sanitized = sanitize(s);
        Ok(if sanitized.contains("text") {
            Self::TextStory
        } else if sanitized.contains("pinup") {
            Self::PinUp
        } else if sanitized.contains("letter") {
            Self::Letters
        } else if sanitized.contains("preview") {
            Self::Preview
        } else if sanitized.contains("cover") {
            Self::Cover
        } else if sanitized.contains("story") || sanitized.contains("comic") {
            Self::Story
        } else {
            Self::Unknown
        })
    }
}
impl Display for StoryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
