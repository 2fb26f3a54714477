//! Main extraction logic for comic catalog pages.

mod blocks;
mod credits;
mod listing;
mod stories;
mod variants;

use std::cell::RefCell;
use std::convert::Infallible;
use std::str::FromStr;

pub use self::listing::{extract_listing, extract_listing_with_diagnostics};
use crate::consts::{self, EN_DASH_JOIN, SEPARATOR_GLYPH};
use crate::diagnostics::Diagnostics;
use crate::models::{ComicDetails, CommunityRating, Engagement};
use crate::normalize::normalize;
use crate::parse;
use scraper::{ElementRef, Html, Selector};
use time::Date;
use tracing::instrument;

/// Extracts [`ComicDetails`] from a detail page.
///
/// Extraction never fails. Every field that cannot be found or parsed falls
/// back to its default (empty string, zero, today's date, `None`), and the
/// anchor that was looked for is recorded in the [`Diagnostics`] returned by
/// [`details_with_diagnostics`](Self::details_with_diagnostics).
#[derive(Debug)]
pub struct Extractor {
    document: Html,
    diagnostics: RefCell<Diagnostics>,
}
impl Extractor {
    pub fn from_document(document: Html) -> Self {
        Self {
            document,
            diagnostics: RefCell::new(Diagnostics::default()),
        }
    }

    /// Normalizes the raw markup before parsing it; see [`normalize`](crate::normalize).
    pub fn from_html(html: &str) -> Self {
        Self::from_document(Html::parse_document(&normalize(html)))
    }

    /// Extracts the detail entity, discarding diagnostics.
    pub fn details(&self) -> ComicDetails {
        let details = self.extract();
        let diagnostics = self.diagnostics.borrow();
        if !diagnostics.is_clean() {
            tracing::debug!(id = details.id, %diagnostics, "extracted comic details with defaults");
        }
        details
    }

    /// Extracts the detail entity together with the anchors that were missing.
    pub fn details_with_diagnostics(self) -> (ComicDetails, Diagnostics) {
        let details = self.extract();
        (details, self.diagnostics.into_inner())
    }

    #[instrument(skip(self), fields(id))]
    fn extract(&self) -> ComicDetails {
        self.diagnostics.replace(Diagnostics::default());
        let title = self.title();
        let intro = self.intro_links();
        let canonical = self.canonical_url();
        let blocks = self.blocks();
        let (format, pages, price) = self.format_info();
        let id = consts::CANONICAL_ID_REGEX
            .captures(&canonical)
            .and_then(|captures| captures[1].parse::<u64>().ok())
            .unwrap_or(0);
        tracing::Span::current().record("id", id);
        ComicDetails {
            id,
            issue_number: consts::ISSUE_NUMBER_REGEX.captures(&title).map(|captures| captures[1].to_string()),
            slug: consts::CANONICAL_SLUG_REGEX
                .captures(&canonical)
                .map(|captures| captures[1].to_string())
                .unwrap_or_else(|| parse::slug(&canonical)),
            variant_of: consts::VARIANT_PARAM_REGEX
                .captures(&canonical)
                .and_then(|captures| captures[1].parse::<u64>().ok()),
            title,
            publisher: intro.first().cloned().unwrap_or_default(),
            release_date: self.release_date(&intro),
            description: self.description(),
            cover_date: blocks.cover_date(),
            pages,
            price,
            format,
            upc: blocks.upc(),
            isbn: blocks.isbn(),
            distributor_sku: blocks.distributor_sku(),
            final_order_cutoff: blocks.final_order_cutoff(),
            cover_image: self.cover_image(),
            url: parse::absolute_url(&canonical),
            rating: self.rating(),
            engagement: self.engagement(),
            series_url: self.link(&consts::SERIES_LINK_SELECTOR, "series link").unwrap_or_default(),
            creators: self.creators(),
            characters: self.characters(),
            variants: self.variants(),
            stories: self.stories(),
            previous_issue_url: self.optional_link(&consts::PREVIOUS_LINK_SELECTOR),
            next_issue_url: self.optional_link(&consts::NEXT_LINK_SELECTOR),
        }
    }

    pub(crate) fn missing(&self, anchor: &'static str) {
        self.diagnostics.borrow_mut().missing(anchor);
    }

    fn select_first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.document.select(selector).next()
    }

    /// Reads the title from the page heading(s), appending the `small`
    /// sub-heading after an en-dash when there is one.
    fn title(&self) -> String {
        let headings: Vec<_> = self.document.select(&consts::HEADING_SELECTOR).collect();
        if headings.is_empty() {
            self.missing("title");
            return String::new();
        }
        let main = headings
            .iter()
            .map(|heading| text_without(*heading, &consts::SMALL_SELECTOR))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let sub = headings
            .iter()
            .find_map(|heading| heading.select(&consts::SMALL_SELECTOR).next())
            .map(text_of)
            .filter(|text| !text.is_empty());
        match sub {
            Some(sub) if !main.is_empty() => format!("{main}{EN_DASH_JOIN}{sub}"),
            Some(sub) => sub,
            None => main,
        }
    }

    /// Link texts of the intro line: the publisher first, the release date last.
    fn intro_links(&self) -> Vec<String> {
        let links: Vec<_> = self.document.select(&consts::INTRO_LINK_SELECTOR).map(text_of).collect();
        if links.is_empty() {
            self.missing("intro");
        }
        links
    }

    fn release_date(&self, intro: &[String]) -> Date {
        let Some(text) = intro.last() else {
            return parse::today();
        };
        parse::try_date(text).unwrap_or_else(|_| {
            tracing::trace!(value = %text, "unparsable release date; defaulting to today");
            parse::today()
        })
    }

    fn canonical_url(&self) -> String {
        self.select_first(&consts::CANONICAL_SELECTOR)
            .and_then(|link| link.value().attr("href"))
            .or_else(|| self.select_first(&consts::OG_URL_SELECTOR).and_then(|meta| meta.value().attr("content")))
            .map(str::to_string)
            .unwrap_or_else(|| {
                self.missing("canonical url");
                String::new()
            })
    }

    fn description(&self) -> String {
        let paragraphs: Vec<_> = self
            .document
            .select(&consts::DESCRIPTION_SELECTOR)
            .map(text_of)
            .filter(|text| !text.is_empty())
            .collect();
        if paragraphs.is_empty() {
            self.missing("description");
        }
        paragraphs.join("\n")
    }

    /// Prefers the dedicated cover art block, falling back to the page's
    /// social-preview image.
    fn cover_image(&self) -> String {
        self.select_first(&consts::COVER_ART_SELECTOR)
            .map(image_source)
            .filter(|src| !src.is_empty())
            .or_else(|| {
                self.select_first(&consts::OG_IMAGE_SELECTOR)
                    .and_then(|meta| meta.value().attr("content"))
                    .map(parse::absolute_url)
            })
            .unwrap_or_else(|| {
                self.missing("cover image");
                String::new()
            })
    }

    fn rating(&self) -> CommunityRating {
        let text_at = |selector: &Selector, anchor: &'static str| {
            self.select_first(selector).map(text_of).unwrap_or_else(|| {
                self.missing(anchor);
                String::new()
            })
        };
        CommunityRating {
            value: parse::float(&text_at(&consts::RATING_SCORE_SELECTOR, "rating score")),
            count: parse::integer(&text_at(&consts::RATING_COUNT_SELECTOR, "rating count")),
            text: text_at(&consts::RATING_TEXT_SELECTOR, "rating text"),
        }
    }

    /// Reads counters from labelled icon groups, dispatching on the label.
    fn engagement(&self) -> Engagement {
        let mut engagement = Engagement::default();
        let mut found = false;
        for stat in self.document.select(&consts::STAT_SELECTOR) {
            found = true;
            let label = stat
                .select(&consts::STAT_LABEL_SELECTOR)
                .next()
                .map(text_of)
                .or_else(|| stat.value().attr("title").map(str::to_string))
                .unwrap_or_default()
                .to_lowercase();
            let count = stat.select(&consts::STAT_COUNT_SELECTOR).next().map(text_of).unwrap_or_default();
            let count = parse::integer(&count);
            if label.contains("pull") {
                engagement.pulls = count;
            } else if label.contains("collect") {
                engagement.collected = count;
            } else if label.contains("want") {
                engagement.wanted = count;
            } else if label.contains("read") {
                engagement.read = count;
            } else {
                tracing::trace!(label, "ignoring unknown engagement counter");
            }
        }
        if !found {
            self.missing("engagement");
        }
        engagement
    }

    /// Splits the combined `"Comic · 32 pages · $3.99"` line into
    /// format, page count and price.
    fn format_info(&self) -> (String, u32, f64) {
        let Some(text) = self.select_first(&consts::FORMAT_SELECTOR).map(text_of) else {
            self.missing("format");
            return (String::new(), 0, 0.0);
        };
        let format = text.split(SEPARATOR_GLYPH).next().unwrap_or_default().trim().to_string();
        let pages = consts::PAGE_COUNT_REGEX
            .captures(&text)
            .and_then(|captures| captures[1].parse::<u32>().ok())
            .unwrap_or(0);
        let price = consts::FORMAT_PRICE_REGEX
            .captures(&text)
            .map(|captures| parse::price(&captures[1]))
            .unwrap_or(0.0);
        (format, pages, price)
    }

    fn link(&self, selector: &Selector, anchor: &'static str) -> Option<String> {
        let link = self.optional_link(selector);
        if link.is_none() {
            self.missing(anchor);
        }
        link
    }

    fn optional_link(&self, selector: &Selector) -> Option<String> {
        self.select_first(selector)
            .and_then(|link| link.value().attr("href"))
            .map(parse::absolute_url)
            .filter(|url| !url.is_empty())
    }
}
impl FromStr for Extractor {
    type Err = Infallible;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from_html(s))
    }
}
impl From<String> for Extractor {
    fn from(value: String) -> Self {
        Self::from_html(&value)
    }
}
impl From<Html> for Extractor {
    fn from(document: Html) -> Self {
        Self::from_document(document)
    }
}
impl From<Extractor> for ComicDetails {
    fn from(extractor: Extractor) -> Self {
        extractor.details()
    }
}

/// Text content of an element with whitespace runs collapsed.
pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Text content of an element, skipping any descendant matched by `excluded`.
pub(crate) fn text_without(element: ElementRef<'_>, excluded: &Selector) -> String {
    let mut text = String::new();
    for node in element.descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };
        let inside_excluded = node
            .ancestors()
            .take_while(|ancestor| ancestor.id() != element.id())
            .filter_map(ElementRef::wrap)
            .any(|ancestor| excluded.matches(&ancestor));
        if !inside_excluded {
            text.push_str(fragment);
        }
    }
    collapse_whitespace(&text)
}

/// Image URL of an `<img>`, preferring the lazy-load attribute.
pub(crate) fn image_source(image: ElementRef<'_>) -> String {
    ["data-src", "src"]
        .into_iter()
        .filter_map(|attr| image.value().attr(attr))
        .map(str::trim)
        .find(|src| !src.is_empty())
        .map(parse::absolute_url)
        .unwrap_or_default()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
