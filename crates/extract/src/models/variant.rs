/// An alternate cover edition listed on an issue's detail page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct Variant {
    /// Variant ID from the `variant` query parameter (`0` if absent)
    pub id: u64,
    pub title: String,
    pub cover_image: String,
    pub url: String,
    /// Heading of the group the variant is listed under, e.g. "Incentive Covers"
    pub category: String,
}
