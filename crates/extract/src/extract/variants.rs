use super::{Extractor, image_source, text_of};
use crate::consts;
use crate::models::Variant;
use crate::parse;
use scraper::ElementRef;

impl Extractor {
    /// Variant covers, each labelled with the heading of its enclosing group.
    pub(super) fn variants(&self) -> Vec<Variant> {
        let mut found = false;
        let mut variants = Vec::new();
        for group in self.document.select(&consts::VARIANT_GROUP_SELECTOR) {
            found = true;
            let category = group
                .select(&consts::VARIANT_CATEGORY_SELECTOR)
                .next()
                .map(text_of)
                .unwrap_or_default();
            variants.extend(
                group
                    .select(&consts::VARIANT_SELECTOR)
                    .filter_map(|node| variant(node, &category)),
            );
        }
        if !found {
            self.missing("variants");
        }
        variants
    }
}

/// Reads a single variant; entries without both a title and a link are skipped.
fn variant(node: ElementRef<'_>, category: &str) -> Option<Variant> {
    let link = node.select(&consts::VARIANT_LINK_SELECTOR).next()?;
    let href = link.value().attr("href").unwrap_or_default();
    let title = node
        .select(&consts::VARIANT_TITLE_SELECTOR)
        .next()
        .map(text_of)
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| text_of(link));
    let url = parse::absolute_url(href);
    if title.is_empty() || url.is_empty() {
        tracing::trace!(title, url, "skipping incomplete variant");
        return None;
    }
    Some(Variant {
        id: consts::VARIANT_PARAM_REGEX
            .captures(href)
            .and_then(|captures| captures[1].parse().ok())
            .unwrap_or(0),
        title,
        cover_image: node
            .select(&consts::IMAGE_SELECTOR)
            .next()
            .map(image_source)
            .unwrap_or_default(),
        url,
        category: category.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_variants_inherit_category() {
        let html = r#"<div id="variants">
            <div class="variant-group">
                <h4 class="variant-category">Cover Variants</h4>
                <div class="variant"><a href="/comic/100/batman-1?variant=555"><img data-src="/assets/b.jpg" src="/blank.gif"><span class="variant-title">Cover B</span></a></div>
                <div class="variant"><a href="/comic/100/batman-1?variant=x">Cover C</a></div>
            </div>
            <div class="variant-group">
                <h4 class="variant-category">Incentive Covers</h4>
                <div class="variant"><a href="/comic/100/batman-1?variant=556"><span class="variant-title">1:25 Incentive</span></a></div>
                <div class="variant"><span class="variant-title">No Link</span></div>
                <div class="variant"><a href="/comic/100/batman-1?variant=557"><img src="/c.jpg"></a></div>
            </div>
        </div>"#;
        let extractor = Extractor::from_document(Html::parse_document(html));
        let variants = extractor.variants();
        assert_eq!(variants.len(), 3);

        assert_eq!(variants[0].id, 555);
        assert_eq!(variants[0].title, "Cover B");
        assert_eq!(variants[0].category, "Cover Variants");
        assert_eq!(variants[0].cover_image, "https://leagueofcomicgeeks.com/assets/b.jpg");
        assert_eq!(variants[0].url, "https://leagueofcomicgeeks.com/comic/100/batman-1?variant=555");

        // Falls back to the link text, id unparsable.
        assert_eq!(variants[1].id, 0);
        assert_eq!(variants[1].title, "Cover C");
        assert_eq!(variants[1].cover_image, "");

        assert_eq!(variants[2].id, 556);
        assert_eq!(variants[2].category, "Incentive Covers");
    }
}
