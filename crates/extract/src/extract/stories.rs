use super::credits::{characters_in, credits_in, dedup_creators};
use super::{Extractor, text_of};
use crate::consts;
use crate::models::{CreatorSource, Story, StoryKind};
use crate::parse;

impl Extractor {
    /// Stories contained in the issue. Stories without a title are dropped.
    pub(super) fn stories(&self) -> Vec<Story> {
        let mut found = false;
        let mut stories = Vec::new();
        for node in self.document.select(&consts::STORY_SELECTOR) {
            found = true;
            let title = node.select(&consts::STORY_TITLE_SELECTOR).next().map(text_of).unwrap_or_default();
            if title.is_empty() {
                continue;
            }
            let kind = node
                .select(&consts::STORY_TYPE_SELECTOR)
                .next()
                .map(text_of)
                .and_then(|kind| kind.parse::<StoryKind>().ok())
                .unwrap_or_default();
            let pages = node
                .select(&consts::STORY_PAGES_SELECTOR)
                .next()
                .map(text_of)
                .and_then(|pages| parse::try_integer(&pages).ok())
                .and_then(|pages| u32::try_from(pages).ok());
            stories.push(Story {
                title,
                kind,
                pages,
                creators: dedup_creators(credits_in(node, CreatorSource::Creator)),
                characters: characters_in(node, &consts::CHARACTER_SELECTOR),
            });
        }
        if !found {
            self.missing("stories");
        }
        stories
    }
}
