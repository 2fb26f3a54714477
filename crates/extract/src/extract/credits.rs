use super::{Extractor, text_of};
use crate::consts;
use crate::models::{Character, Creator, CreatorSource};
use crate::parse;
use scraper::{ElementRef, Selector};
use std::collections::HashSet;

impl Extractor {
    /// Credits from every credits group on the page, deduplicated.
    pub(super) fn creators(&self) -> Vec<Creator> {
        let mut found = false;
        let mut creators = Vec::new();
        for group in self.document.select(&consts::CREDIT_GROUP_SELECTOR) {
            found = true;
            let source = group
                .value()
                .attr("data-source")
                .and_then(|source| source.parse::<CreatorSource>().ok())
                .unwrap_or_default();
            creators.extend(credits_in(group, source));
        }
        if !found {
            self.missing("creators");
        }
        dedup_creators(creators)
    }

    pub(super) fn characters(&self) -> Vec<Character> {
        let characters: Vec<_> = self
            .document
            .select(&consts::CHARACTER_LIST_SELECTOR)
            .filter_map(character)
            .collect();
        if characters.is_empty() {
            self.missing("characters");
        }
        characters
    }
}

/// Every credit below `scope`, tagged with `source`. Credits without a name are dropped.
pub(super) fn credits_in(scope: ElementRef<'_>, source: CreatorSource) -> Vec<Creator> {
    scope
        .select(&consts::CREDIT_SELECTOR)
        .filter_map(|credit| {
            let link = credit.select(&consts::CREDIT_NAME_SELECTOR).next()?;
            let name = text_of(link);
            if name.is_empty() {
                return None;
            }
            Some(Creator {
                name,
                role: credit
                    .select(&consts::CREDIT_ROLE_SELECTOR)
                    .next()
                    .map(text_of)
                    .unwrap_or_default(),
                url: link.value().attr("href").map(parse::absolute_url).unwrap_or_default(),
                source,
            })
        })
        .collect()
}

/// Removes repeated credits, keeping the first occurrence of each.
pub(super) fn dedup_creators(creators: Vec<Creator>) -> Vec<Creator> {
    let mut seen = HashSet::with_capacity(creators.len());
    creators.into_iter().filter(|creator| seen.insert(creator.clone())).collect()
}

pub(super) fn characters_in(scope: ElementRef<'_>, selector: &Selector) -> Vec<Character> {
    scope.select(selector).filter_map(character).collect()
}

fn character(node: ElementRef<'_>) -> Option<Character> {
    let link = node.select(&consts::CHARACTER_NAME_SELECTOR).next()?;
    let name = text_of(link);
    if name.is_empty() {
        return None;
    }
    let optional_text = |selector: &Selector| {
        node.select(selector)
            .next()
            .map(text_of)
            .filter(|text| !text.is_empty())
    };
    Some(Character {
        name,
        real_name: optional_text(&consts::CHARACTER_REAL_NAME_SELECTOR),
        url: link.value().attr("href").map(parse::absolute_url).unwrap_or_default(),
        kind: optional_text(&consts::CHARACTER_TYPE_SELECTOR),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const CREDITS: &str = r#"<div id="creators">
        <div class="credits-group" data-source="creator">
            <div class="credit"><div class="name"><a href="/people/1/tom-king">Tom King</a></div><div class="role">Writer</div></div>
            <div class="credit"><div class="name"><a href="/people/2/mitch-gerads">Mitch Gerads</a></div><div class="role">Artist</div></div>
        </div>
        <div class="credits-group" data-source="cover">
            <div class="credit"><div class="name"><a href="/people/2/mitch-gerads">Mitch Gerads</a></div><div class="role">Artist</div></div>
        </div>
        <div class="credits-group" data-source="creator">
            <div class="credit"><div class="name"><a href="/people/1/tom-king">Tom King</a></div><div class="role">Writer</div></div>
            <div class="credit"><div class="name"><a href="/people/3"></a></div><div class="role">Letterer</div></div>
        </div>
    </div>"#;

    #[test]
    fn test_creators_dedup_across_groups() {
        let extractor = Extractor::from_document(Html::parse_document(CREDITS));
        let creators = extractor.creators();
        assert_eq!(creators.len(), 3);
        assert_eq!(creators[0].name, "Tom King");
        assert_eq!(creators[0].url, "https://leagueofcomicgeeks.com/people/1/tom-king");
        assert_eq!(creators[1].source, CreatorSource::Creator);
        // Same person, different section: kept.
        assert_eq!(creators[2].name, "Mitch Gerads");
        assert_eq!(creators[2].source, CreatorSource::Cover);
    }

    #[test]
    fn test_unknown_source_defaults_to_creator() {
        let html = r#"<div id="creators"><div class="credits-group" data-source="editorial">
            <div class="credit"><div class="name"><a href="/people/9">Jamie S. Rich</a></div><div class="role">Editor</div></div>
        </div></div>"#;
        let extractor = Extractor::from_document(Html::parse_document(html));
        let creators = extractor.creators();
        assert_eq!(creators.len(), 1);
        assert_eq!(creators[0].source, CreatorSource::Creator);
    }

    #[test]
    fn test_characters() {
        let html = r#"<div id="characters">
            <div class="character"><div class="name"><a href="/character/1/batman">Batman</a></div><div class="real-name">Bruce Wayne</div><div class="character-type">Main</div></div>
            <div class="character"><div class="name"><a href="https://example.com/robin">Robin</a></div></div>
            <div class="character"><div class="name"><a href="/character/3"> </a></div></div>
        </div>"#;
        let extractor = Extractor::from_document(Html::parse_document(html));
        let characters = extractor.characters();
        assert_eq!(
            characters,
            vec![
                Character {
                    name: "Batman".to_string(),
                    real_name: Some("Bruce Wayne".to_string()),
                    url: "https://leagueofcomicgeeks.com/character/1/batman".to_string(),
                    kind: Some("Main".to_string()),
                },
                Character {
                    name: "Robin".to_string(),
                    real_name: None,
                    url: "https://example.com/robin".to_string(),
                    kind: None,
                },
            ]
        );
    }

    #[test]
    fn test_missing_sections_are_recorded() {
        let extractor = Extractor::from_document(Html::parse_document("<div></div>"));
        assert!(extractor.creators().is_empty());
        assert!(extractor.characters().is_empty());
        let diagnostics = extractor.diagnostics.borrow();
        assert!(diagnostics.contains("creators"));
        assert!(diagnostics.contains("characters"));
    }
}
