//! Listing query filters.
//!
//! | Key         | Default                  |
//! |-------------|--------------------------|
//! | `addons`    | `1`                      |
//! | `list`      | `releases`               |
//! | `order`     | `alpha-asc`              |
//! | `format[]`  | `1` through `6`          |
//! | `date_type` | `week`                   |
//! | `date`      | today (UTC), `YYYY-MM-DD` |
//! | `publisher[]` | none                   |
//!
//! A caller value replaces its default outright; lists are never merged.

use derive_more::Display;
use time::Date;

/// Publication format codes understood by the listing endpoint.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    #[display("1")]
    Issue,
    #[display("2")]
    VariantOrReprint,
    #[display("3")]
    TradePaperback,
    #[display("4")]
    Hardcover,
    #[display("5")]
    DigitalChapter,
    #[display("6")]
    Annual,
}
impl Format {
    pub const ALL: [Format; 6] = [
        Format::Issue,
        Format::VariantOrReprint,
        Format::TradePaperback,
        Format::Hardcover,
        Format::DigitalChapter,
        Format::Annual,
    ];
}

#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Order {
    #[default]
    #[display("alpha-asc")]
    AlphaAsc,
    #[display("alpha-desc")]
    AlphaDesc,
    #[display("pulls")]
    Pulls,
    #[display("community")]
    Community,
}

#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ListKind {
    #[default]
    #[display("releases")]
    Releases,
    #[display("pulls")]
    Pulls,
}

/// Span of time `date` is interpreted over.
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DateType {
    #[display("day")]
    Day,
    #[default]
    #[display("week")]
    Week,
    #[display("month")]
    Month,
}

/// Caller-supplied listing filters; `None` (or an empty publisher list)
/// means "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComicFilters {
    pub formats: Option<Vec<Format>>,
    pub order: Option<Order>,
    pub list: Option<ListKind>,
    pub date_type: Option<DateType>,
    pub date: Option<Date>,
    pub publishers: Vec<u64>,
    pub addons: Option<bool>,
}
impl ComicFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn formats(mut self, formats: impl IntoIterator<Item = Format>) -> Self {
        self.formats = Some(formats.into_iter().collect());
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    pub fn list(mut self, list: ListKind) -> Self {
        self.list = Some(list);
        self
    }

    pub fn date_type(mut self, date_type: DateType) -> Self {
        self.date_type = Some(date_type);
        self
    }

    pub fn date(mut self, date: Date) -> Self {
        self.date = Some(date);
        self
    }

    pub fn publishers(mut self, publishers: impl IntoIterator<Item = u64>) -> Self {
        self.publishers = publishers.into_iter().collect();
        self
    }

    pub fn addons(mut self, addons: bool) -> Self {
        self.addons = Some(addons);
        self
    }

    /// Renders the merged query pairs in a stable order.
    ///
    /// `today` is only used when no date was given.
    pub fn query(&self, today: Date) -> Vec<(String, String)> {
        let mut query = Vec::with_capacity(12);
        let mut push = |key: &str, value: String| query.push((key.to_string(), value));
        push("addons", if self.addons.unwrap_or(true) { "1" } else { "0" }.to_string());
        push("list", self.list.unwrap_or_default().to_string());
        push("order", self.order.unwrap_or_default().to_string());
        let formats = self.formats.as_deref().unwrap_or(&Format::ALL);
        for format in formats {
            push("format[]", format.to_string());
        }
        push("date_type", self.date_type.unwrap_or_default().to_string());
        push("date", self.date.unwrap_or(today).to_string());
        for publisher in &self.publishers {
            push("publisher[]", publisher.to_string());
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn pairs(query: &[(String, String)]) -> Vec<(&str, &str)> {
        query.iter().map(|(key, value)| (key.as_str(), value.as_str())).collect()
    }

    #[test]
    fn test_defaults() {
        let query = ComicFilters::new().query(date!(2024 - 01 - 17));
        assert_eq!(
            pairs(&query),
            vec![
                ("addons", "1"),
                ("list", "releases"),
                ("order", "alpha-asc"),
                ("format[]", "1"),
                ("format[]", "2"),
                ("format[]", "3"),
                ("format[]", "4"),
                ("format[]", "5"),
                ("format[]", "6"),
                ("date_type", "week"),
                ("date", "2024-01-17"),
            ]
        );
    }

    #[test]
    fn test_caller_values_replace_defaults() {
        let filters = ComicFilters::new()
            .formats([Format::TradePaperback])
            .order(Order::Pulls)
            .date(date!(2023 - 12 - 06))
            .date_type(DateType::Day)
            .publishers([1, 12])
            .addons(false);
        let query = filters.query(date!(2024 - 01 - 17));
        assert_eq!(
            pairs(&query),
            vec![
                ("addons", "0"),
                ("list", "releases"),
                ("order", "pulls"),
                ("format[]", "3"),
                ("date_type", "day"),
                ("date", "2023-12-06"),
                ("publisher[]", "1"),
                ("publisher[]", "12"),
            ]
        );
    }
}
