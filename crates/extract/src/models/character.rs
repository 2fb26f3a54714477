/// A character appearing in an issue or story.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct Character {
    pub name: String,
    /// Civilian identity, when listed
    pub real_name: Option<String>,
    pub url: String,
    /// Involvement, e.g. "Main" or "Cameo"
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: Option<String>,
}
