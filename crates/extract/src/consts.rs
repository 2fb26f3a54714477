use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

/// Origin that relative links in scraped markup are resolved against.
pub const BASE_URL: &str = "https://leagueofcomicgeeks.com";

macro_rules! selector {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// Listing fragment.
selector!(LISTING_CONTAINER_SELECTOR, "#comic-list-issues");
selector!(LISTING_ITEM_SELECTOR, "li[data-comic]");
selector!(LISTING_TITLE_SELECTOR, ".title a");
selector!(LISTING_VARIANT_NAME_SELECTOR, ".variant-name");
selector!(LISTING_PUBLISHER_SELECTOR, ".publisher");
selector!(LISTING_DATE_SELECTOR, ".date");
selector!(LISTING_PRICE_SELECTOR, ".price");
selector!(LISTING_COVER_SELECTOR, ".cover img");
selector!(LISTING_COVER_LINK_SELECTOR, ".cover a[href]");

// Detail page header.
selector!(HEADING_SELECTOR, ".page-details h1");
selector!(SMALL_SELECTOR, "small");
selector!(INTRO_LINK_SELECTOR, ".page-details .header-intro a");
selector!(CANONICAL_SELECTOR, "link[rel='canonical'][href]");
selector!(OG_URL_SELECTOR, "meta[property='og:url'][content]");
selector!(OG_IMAGE_SELECTOR, "meta[property='og:image'][content]");
selector!(DESCRIPTION_SELECTOR, ".listing-description p");
selector!(COVER_ART_SELECTOR, "#comic-cover-art img");
selector!(FORMAT_SELECTOR, ".page-details .format-info");

// Community rating and engagement.
selector!(RATING_SCORE_SELECTOR, "#comic-rating .rating-score");
selector!(RATING_COUNT_SELECTOR, "#comic-rating .rating-count");
selector!(RATING_TEXT_SELECTOR, "#comic-rating .rating-text");
selector!(STAT_SELECTOR, "#comic-stats .stat");
selector!(STAT_LABEL_SELECTOR, ".label");
selector!(STAT_COUNT_SELECTOR, ".count");

// Labelled detail blocks.
selector!(DETAIL_BLOCK_SELECTOR, ".details-addtl-block");
selector!(DETAIL_NAME_SELECTOR, ".name");
selector!(DETAIL_VALUE_SELECTOR, ".value");

// Series navigation.
selector!(SERIES_LINK_SELECTOR, "#comic-series-nav a.series[href]");
selector!(PREVIOUS_LINK_SELECTOR, "#comic-series-nav a.prev[href]");
selector!(NEXT_LINK_SELECTOR, "#comic-series-nav a.next[href]");

// Credits.
selector!(CREDIT_GROUP_SELECTOR, "#creators .credits-group");
selector!(CREDIT_SELECTOR, ".credit");
selector!(CREDIT_NAME_SELECTOR, ".name a");
selector!(CREDIT_ROLE_SELECTOR, ".role");
selector!(CHARACTER_LIST_SELECTOR, "#characters .character");
selector!(CHARACTER_SELECTOR, ".character");
selector!(CHARACTER_NAME_SELECTOR, ".name a");
selector!(CHARACTER_REAL_NAME_SELECTOR, ".real-name");
selector!(CHARACTER_TYPE_SELECTOR, ".character-type");

// Variants.
selector!(VARIANT_GROUP_SELECTOR, "#variants .variant-group");
selector!(VARIANT_CATEGORY_SELECTOR, ".variant-category");
selector!(VARIANT_SELECTOR, ".variant");
selector!(VARIANT_LINK_SELECTOR, "a[href]");
selector!(VARIANT_TITLE_SELECTOR, ".variant-title");
selector!(IMAGE_SELECTOR, "img");

// Stories.
selector!(STORY_SELECTOR, "#stories .story");
selector!(STORY_TITLE_SELECTOR, ".story-title");
selector!(STORY_TYPE_SELECTOR, ".story-type");
selector!(STORY_PAGES_SELECTOR, ".story-pages");

regex!(ISSUE_NUMBER_REGEX, r"#(\d+)");
regex!(CANONICAL_ID_REGEX, r"comic/(\d+)/");
regex!(CANONICAL_SLUG_REGEX, r"comic/\d+/([^/?#]+)");
regex!(VARIANT_PARAM_REGEX, r"[?&]variant=(\d+)");
regex!(PAGE_COUNT_REGEX, r"(?i)(\d+)\s*pages?");
regex!(FORMAT_PRICE_REGEX, r"\$\s*(\d+(?:\.\d+)?)");
regex!(LEADING_TOKEN_REGEX, r"^\S+\s+");

/// Decorative separator used between price/format fragments.
pub(crate) const SEPARATOR_GLYPH: char = '·';
/// Joins a title with its variant or sub-heading.
pub(crate) const EN_DASH_JOIN: &str = " – ";
