use time::Date;

/// One issue as it appears in a release listing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct ComicSummary {
    /// Listing entry ID (the variant's own ID for variant entries)
    pub id: u64,
    /// Title, with the variant name appended after an en-dash for variants
    pub title: String,
    pub publisher: String,
    /// Release date (today when the listing date could not be parsed)
    pub date: Date,
    /// Cover price (`0.0` when unknown)
    pub price: f64,
    pub cover_image: String,
    /// Absolute URL of the detail page
    pub url: String,
    pub pulls: u64,
    pub community: u64,
    /// Title slug taken from the detail URL
    pub title_path: String,
    /// Present only for variant covers
    #[cfg_attr(feature = "serde", serde(flatten, skip_serializing_if = "Option::is_none"))]
    pub variant: Option<ListingVariant>,
}
impl ComicSummary {
    pub fn is_variant(&self) -> bool {
        self.variant.is_some()
    }
}

/// Variant annotations of a listing entry whose parent ID is nonzero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct ListingVariant {
    pub variant_id: u64,
    pub parent_id: u64,
    pub variant_name: String,
}
