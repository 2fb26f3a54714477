use super::{image_source, text_of, text_without};
use crate::consts::{self, EN_DASH_JOIN, SEPARATOR_GLYPH};
use crate::diagnostics::Diagnostics;
use crate::models::{ComicSummary, ListingVariant};
use crate::normalize::normalize;
use crate::parse;
use scraper::{ElementRef, Html, Selector};
use tracing::instrument;

/// Extracts every issue entry from a listing fragment.
///
/// Never fails: unparsable fields take their defaults and markup without any
/// entries yields an empty list.
pub fn extract_listing(html: &str) -> Vec<ComicSummary> {
    let (summaries, diagnostics) = extract_listing_with_diagnostics(html);
    if !diagnostics.is_clean() {
        tracing::debug!(count = summaries.len(), %diagnostics, "extracted listing with defaults");
    }
    summaries
}

/// Like [`extract_listing`], also reporting which anchors were missing.
#[instrument(skip(html), fields(html_size = html.len(), count))]
pub fn extract_listing_with_diagnostics(html: &str) -> (Vec<ComicSummary>, Diagnostics) {
    let fragment = Html::parse_fragment(&normalize(html));
    let mut diagnostics = Diagnostics::default();
    let root = match fragment.select(&consts::LISTING_CONTAINER_SELECTOR).next() {
        Some(container) => container,
        None => {
            diagnostics.missing("listing container");
            fragment.root_element()
        },
    };
    let summaries: Vec<_> = root
        .select(&consts::LISTING_ITEM_SELECTOR)
        .map(|item| summary(item, &mut diagnostics))
        .collect();
    tracing::Span::current().record("count", summaries.len());
    (summaries, diagnostics)
}

fn summary(item: ElementRef<'_>, diagnostics: &mut Diagnostics) -> ComicSummary {
    let data = |name: &str| item.value().attr(name).map(parse::integer).unwrap_or(0);
    let id = data("data-comic");
    let parent_id = data("data-parent");

    let title_link = item.select(&consts::LISTING_TITLE_SELECTOR).next();
    let variant_name = item
        .select(&consts::LISTING_VARIANT_NAME_SELECTOR)
        .next()
        .map(text_of)
        .filter(|name| !name.is_empty());
    let title = match title_link {
        Some(link) => text_without(link, &consts::LISTING_VARIANT_NAME_SELECTOR),
        None => {
            diagnostics.missing("listing title");
            String::new()
        },
    };
    let title = match &variant_name {
        Some(name) if !title.is_empty() => format!("{title}{EN_DASH_JOIN}{name}"),
        _ => title,
    };

    let text_at = |selector: &Selector, anchor: &'static str, diagnostics: &mut Diagnostics| {
        item.select(selector).next().map(text_of).unwrap_or_else(|| {
            diagnostics.missing(anchor);
            String::new()
        })
    };
    let publisher = text_at(&consts::LISTING_PUBLISHER_SELECTOR, "listing publisher", diagnostics);
    let date = text_at(&consts::LISTING_DATE_SELECTOR, "listing date", diagnostics);
    let price = text_at(&consts::LISTING_PRICE_SELECTOR, "listing price", diagnostics).replace(SEPARATOR_GLYPH, "");

    let href = title_link
        .and_then(|link| link.value().attr("href"))
        .or_else(|| {
            item.select(&consts::LISTING_COVER_LINK_SELECTOR)
                .next()
                .and_then(|link| link.value().attr("href"))
        })
        .unwrap_or_default();
    let url = parse::absolute_url(href);

    ComicSummary {
        id,
        title,
        publisher,
        date: parse::date(&date),
        price: parse::price(&price),
        cover_image: item
            .select(&consts::LISTING_COVER_SELECTOR)
            .next()
            .map(image_source)
            .unwrap_or_default(),
        title_path: parse::slug(&url),
        url,
        pulls: data("data-pulls"),
        community: data("data-community"),
        variant: (parent_id != 0).then(|| ListingVariant {
            variant_id: id,
            parent_id,
            variant_name: variant_name.unwrap_or_default(),
        }),
    }
}
