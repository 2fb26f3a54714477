use super::{Character, Creator, Story, Variant};
use time::Date;

/// Everything extracted from an issue's detail page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct ComicDetails {
    /// Comic ID from the canonical URL (`0` if not found)
    pub id: u64,
    /// Title, joined with its sub-heading by an en-dash
    pub title: String,
    /// Issue number from the `#<digits>` part of the title
    pub issue_number: Option<String>,
    /// Title slug from the canonical URL
    pub slug: String,
    /// Variant ID when the canonical URL points at a variant edition
    pub variant_of: Option<u64>,
    pub publisher: String,
    /// Description paragraphs joined by newlines
    pub description: String,
    /// Cover date as printed (free text)
    pub cover_date: String,
    /// Release date (today when unparsable)
    pub release_date: Date,
    pub pages: u32,
    pub price: f64,
    /// Format label, e.g. "Comic" or "Trade Paperback"
    pub format: String,
    pub upc: Option<String>,
    pub isbn: Option<String>,
    pub distributor_sku: String,
    /// Final order cutoff as printed, without its icon label
    pub final_order_cutoff: String,
    pub cover_image: String,
    /// Canonical absolute URL
    pub url: String,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub rating: CommunityRating,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub engagement: Engagement,
    pub series_url: String,
    pub creators: Vec<Creator>,
    pub characters: Vec<Character>,
    pub variants: Vec<Variant>,
    pub stories: Vec<Story>,
    pub previous_issue_url: Option<String>,
    pub next_issue_url: Option<String>,
}

/// Community rating block.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CommunityRating {
    /// Average score
    #[cfg_attr(feature = "serde", serde(rename = "rating"))]
    pub value: f64,
    /// Number of ratings, thousands separators removed
    #[cfg_attr(feature = "serde", serde(rename = "ratingCount"))]
    pub count: u64,
    /// Descriptive label for the score, e.g. "Very Good"
    #[cfg_attr(feature = "serde", serde(rename = "ratingText"))]
    pub text: String,
}

/// Reader engagement counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Engagement {
    pub pulls: u64,
    pub collected: u64,
    pub read: u64,
    pub wanted: u64,
}
