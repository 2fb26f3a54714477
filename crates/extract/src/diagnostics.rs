use std::fmt::{Display, Formatter, Result as FmtResult};

/// Structural anchors that were not present in the extracted markup.
///
/// Extraction always falls back to a default when an anchor is missing, so
/// on its own an empty title is indistinguishable from a title node that
/// disappeared upstream. Diagnostics make that difference observable without
/// changing the extracted values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    missing: Vec<&'static str>,
}
impl Diagnostics {
    pub(crate) fn missing(&mut self, anchor: &'static str) {
        if !self.missing.contains(&anchor) {
            tracing::trace!(anchor, "structural anchor not found");
            self.missing.push(anchor);
        }
    }

    /// Returns `true` if every anchor was found.
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty()
    }

    /// Returns `true` if the named anchor was missing.
    pub fn contains(&self, anchor: &str) -> bool {
        self.missing.iter().any(|a| *a == anchor)
    }

    /// Missing anchors, in the order they were first looked for.
    pub fn anchors(&self) -> &[&'static str] {
        &self.missing
    }
}
impl Display for Diagnostics {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.missing.is_empty() {
            write!(f, "all anchors present")
        } else {
            write!(f, "missing anchors: {}", self.missing.join(", "))
        }
    }
}
