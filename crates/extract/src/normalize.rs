//! Repairs escape artifacts and whitespace noise in raw markup before it is
//! handed to the structural parser.
//!
//! This is a single-pass pipeline, not a fixpoint normalizer. Running it twice
//! is harmless (entity unescaping and whitespace collapsing are both safe to
//! repeat), but nothing beyond the second pass is guaranteed to be stable.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use tracing::instrument;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// Backslash-escaped line breaks left behind by JSON-embedded markup.
regex!(ESCAPED_BREAK_REGEX, r"\\r\\n|\\n|\\r");
regex!(LINE_BREAK_REGEX, r"\r\n|\r");
regex!(NEWLINES_REGEX, r"\n{2,}");
regex!(SPACES_REGEX, r" {2,}");
regex!(BETWEEN_TAGS_REGEX, r">\s+<");
regex!(CLOSING_TAG_TEXT_REGEX, r"(</[^>]+>)([^\s<])");

const ENTITIES: [(&str, &str); 5] = [
    ("&amp;", "&"),
    ("&quot;", "\""),
    ("&#039;", "'"),
    ("&#39;", "'"),
    ("&apos;", "'"),
];

/// Normalizes raw markup, in order:
///
/// 1. literal `\n`, `\r\n` and `\r` escape sequences become real newlines,
/// 2. real `\r\n`/`\r` line breaks become `\n`,
/// 3. runs of newlines collapse to one,
/// 4. runs of spaces collapse to one,
/// 5. leading and trailing whitespace is trimmed,
/// 6. ampersand and quote entities are unescaped,
/// 7. whitespace between adjacent tags is removed,
/// 8. a closing tag directly followed by text gets a single separating space.
#[instrument(level = "trace", skip(html), fields(html_size = html.len()))]
pub fn normalize(html: &str) -> String {
    let html = ESCAPED_BREAK_REGEX.replace_all(html, "\n");
    let html = LINE_BREAK_REGEX.replace_all(&html, "\n");
    let html = NEWLINES_REGEX.replace_all(&html, "\n");
    let html = SPACES_REGEX.replace_all(&html, " ");
    let html = unescape_entities(html.trim());
    let html = BETWEEN_TAGS_REGEX.replace_all(&html, "><");
    CLOSING_TAG_TEXT_REGEX.replace_all(&html, "$1 $2").into_owned()
}

fn unescape_entities(html: &str) -> Cow<'_, str> {
    if !html.contains('&') {
        return Cow::Borrowed(html);
    }
    let mut owned = html.to_string();
    for (entity, replacement) in ENTITIES {
        if owned.contains(entity) {
            owned = owned.replace(entity, replacement);
        }
    }
    Cow::Owned(owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r"<ul>\n<li>One</li>\r\n<li>Two</li></ul>", "<ul><li>One</li><li>Two</li></ul>")]
    #[case("<p>a\r\n\r\n\r\nb</p>", "<p>a\nb</p>")]
    #[case("<p>too    many   spaces</p>", "<p>too many spaces</p>")]
    #[case("   <div>trim me</div>\n\n", "<div>trim me</div>")]
    #[case("<p>Tom &amp; Jerry&#039;s &quot;Show&quot;</p>", "<p>Tom & Jerry's \"Show\"</p>")]
    #[case("<div>  <span>x</span>\n  </div>", "<div><span>x</span></div>")]
    #[case("<span class=\"bullet\">·</span>$3.99", "<span class=\"bullet\">·</span> $3.99")]
    #[case("<b>Bold</b> already spaced", "<b>Bold</b> already spaced")]
    #[case("", "")]
    fn test_normalize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[rstest]
    #[case(r"<ul>\n  <li>One</li>\n\n<li>Two &amp; Three</li>  </ul>")]
    #[case("<div><a href=\"/x\">Link</a>text  after</div>")]
    fn test_normalize_twice_is_stable(#[case] input: &str) {
        let once = normalize(input);
        assert_eq!(normalize(&once), once);
    }
}
