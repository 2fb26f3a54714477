use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use serde::Deserialize;

/// JSON wrapper returned by the listing endpoint.
///
/// Only the fields the catalog actually reads are modelled; anything else in
/// the payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListingEnvelope {
    /// HTML fragment holding the listing markup
    #[serde(default)]
    pub list: String,
    /// Number of entries upstream claims to have matched
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub configurator: Option<Configurator>,
}
impl ListingEnvelope {
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).or_raise(|| ErrorKind::InvalidResponse)
    }
}

/// Echo of the query upstream applied to the listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Configurator {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub date_type: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default)]
    pub list: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        let envelope = ListingEnvelope::from_json(
            r#"{"list": "<ul id=\"comic-list-issues\"></ul>", "count": 2, "configurator": {"date": "2024-01-17", "order": "alpha-asc", "extra": [1, 2]}, "debug": true}"#,
        )
        .unwrap();
        assert_eq!(envelope.list, r#"<ul id="comic-list-issues"></ul>"#);
        assert_eq!(envelope.count, Some(2));
        let configurator = envelope.configurator.unwrap();
        assert_eq!(configurator.date.as_deref(), Some("2024-01-17"));
        assert_eq!(configurator.date_type, None);
    }

    #[test]
    fn test_reject_non_json() {
        let err = ListingEnvelope::from_json("<html>rate limited</html>").unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidResponse);
    }
}
