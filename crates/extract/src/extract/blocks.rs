use super::{Extractor, text_of};
use crate::consts;
use scraper::ElementRef;
use std::collections::HashMap;

/// Labelled name/value detail blocks ("Cover Date", "UPC", ...), keyed by
/// their lowercased label.
#[derive(Debug)]
pub(crate) struct DetailBlocks<'a> {
    blocks: HashMap<String, ElementRef<'a>>,
}

/// Detail Blocks Internals
impl<'a> DetailBlocks<'a> {
    fn collect(elements: impl Iterator<Item = ElementRef<'a>>) -> Self {
        let mut blocks = HashMap::new();
        for block in elements {
            let Some(name) = block.select(&consts::DETAIL_NAME_SELECTOR).next() else {
                continue;
            };
            let Some(value) = block.select(&consts::DETAIL_VALUE_SELECTOR).next() else {
                continue;
            };
            let label = text_of(name).trim_end_matches(':').trim().to_lowercase();
            // First block wins when a label repeats.
            blocks.entry(label).or_insert(value);
        }
        Self { blocks }
    }

    fn text(&self, labels: &[&str]) -> Option<String> {
        labels
            .iter()
            .find_map(|label| self.blocks.get(*label).copied())
            .map(text_of)
            .filter(|text| !text.is_empty())
    }
}

/// Detail Blocks Public
impl DetailBlocks<'_> {
    pub fn cover_date(&self) -> String {
        self.text(&["cover date"]).unwrap_or_default()
    }

    pub fn upc(&self) -> Option<String> {
        self.text(&["upc"])
    }

    pub fn isbn(&self) -> Option<String> {
        self.text(&["isbn"])
    }

    pub fn distributor_sku(&self) -> String {
        self.text(&["distributor sku", "sku"]).unwrap_or_default()
    }

    /// The value is prefixed with an icon label (e.g. `event Dec 4th, 2023`);
    /// only that first token is stripped.
    pub fn final_order_cutoff(&self) -> String {
        self.text(&["final order cutoff", "foc"])
            .map(|text| consts::LEADING_TOKEN_REGEX.replace(&text, "").into_owned())
            .unwrap_or_default()
    }
}

impl Extractor {
    pub(super) fn blocks(&self) -> DetailBlocks<'_> {
        let blocks = DetailBlocks::collect(self.document.select(&consts::DETAIL_BLOCK_SELECTOR));
        if blocks.blocks.is_empty() {
            self.missing("detail blocks");
        }
        blocks
    }
}
