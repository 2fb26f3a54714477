use longbox_extract::models::{CreatorSource, StoryKind};
use longbox_extract::{Extractor, extract_details, extract_listing, extract_listing_with_diagnostics};
use time::macros::date;

const DETAIL: &str = include_str!("fixtures/detail.html");
const LISTING: &str = include_str!("fixtures/listing.html");

#[test]
fn listing_marks_only_variant_entries() {
    let (summaries, diagnostics) = extract_listing_with_diagnostics(LISTING);
    assert!(diagnostics.is_clean(), "{diagnostics}");
    assert_eq!(summaries.len(), 2);

    let issue = &summaries[0];
    assert_eq!(issue.id, 7712001);
    assert_eq!(issue.title, "Absolute Batman #1");
    assert_eq!(issue.date, date!(2024 - 10 - 09));
    assert_eq!(issue.price, 4.99);
    assert_eq!(issue.pulls, 2318);
    assert_eq!(issue.title_path, "absolute-batman-1");
    assert!(issue.variant.is_none());

    let variant = &summaries[1];
    assert_eq!(variant.title, "Absolute Batman #1 – Cover B Jock");
    assert_eq!(variant.price, 5.99);
    assert_eq!(variant.cover_image, "https://leagueofcomicgeeks.com/comics/covers/medium-7712055.jpg");
    let annotations = variant.variant.as_ref().expect("variant annotations");
    assert_eq!(annotations.variant_id, 7712055);
    assert_eq!(annotations.parent_id, 7712001);
    assert_eq!(annotations.variant_name, "Cover B Jock");
}

#[test]
fn details_header_fields() {
    let (details, diagnostics) = Extractor::from_html(DETAIL).details_with_diagnostics();
    assert!(diagnostics.is_clean(), "{diagnostics}");

    assert_eq!(details.id, 6294321);
    assert_eq!(details.slug, "batman-1");
    assert_eq!(details.variant_of, None);
    assert_eq!(details.title, "Batman #1 – The Court of Owls");
    assert_eq!(details.issue_number.as_deref(), Some("1"));
    assert_eq!(details.publisher, "DC Comics");
    assert_eq!(details.release_date, date!(2011 - 09 - 21));
    assert_eq!(details.url, "https://leagueofcomicgeeks.com/comic/6294321/batman-1");
    assert_eq!(details.cover_image, "https://leagueofcomicgeeks.com/comics/covers/large-6294321.jpg");
    assert!(details.description.starts_with("Following his hit run on DETECTIVE COMICS, Scott Snyder & Greg Capullo"));
    assert_eq!(details.description.lines().count(), 2);

    assert_eq!(details.format, "Comic");
    assert_eq!(details.pages, 32);
    assert_eq!(details.price, 2.99);
    assert_eq!(details.cover_date, "Nov 2011");
    assert_eq!(details.upc.as_deref(), Some("76194126967400111"));
    assert_eq!(details.isbn, None);
    assert_eq!(details.distributor_sku, "JUL110163");
    assert_eq!(details.final_order_cutoff, "Aug 29th, 2011");

    assert_eq!(details.rating.value, 8.9);
    assert_eq!(details.rating.count, 1523);
    assert_eq!(details.rating.text, "Very Good");
    assert_eq!(details.engagement.pulls, 4812);
    assert_eq!(details.engagement.collected, 12097);
    assert_eq!(details.engagement.read, 9330);
    assert_eq!(details.engagement.wanted, 611);

    assert_eq!(details.series_url, "https://leagueofcomicgeeks.com/comics/series/109341/batman");
    assert_eq!(details.previous_issue_url, None);
    assert_eq!(details.next_issue_url.as_deref(), Some("https://leagueofcomicgeeks.com/comic/6385002/batman-2"));
}

#[test]
fn details_collections() {
    let details = extract_details(DETAIL);

    let creators: Vec<_> = details
        .creators
        .iter()
        .map(|creator| (creator.name.as_str(), creator.role.as_str(), creator.source))
        .collect();
    assert_eq!(
        creators,
        vec![
            ("Scott Snyder", "Writer", CreatorSource::Creator),
            ("Greg Capullo", "Penciller", CreatorSource::Creator),
            ("Greg Capullo", "Cover Artist", CreatorSource::Cover),
            ("Mike Marts", "Editor", CreatorSource::Production),
        ]
    );

    assert_eq!(details.characters.len(), 2);
    assert_eq!(details.characters[0].real_name.as_deref(), Some("Bruce Wayne"));
    assert_eq!(details.characters[1].real_name, None);
    assert_eq!(details.characters[1].kind.as_deref(), Some("Supporting"));

    assert_eq!(details.variants.len(), 2);
    assert_eq!(details.variants[0].id, 1048601);
    assert_eq!(details.variants[0].category, "Cover Variants");
    assert_eq!(details.variants[1].title, "1:25 Ethan Van Sciver");
    assert_eq!(details.variants[1].category, "Incentive Covers");

    assert_eq!(details.stories.len(), 1);
    let story = &details.stories[0];
    assert_eq!(story.title, "Knife Trick");
    assert_eq!(story.kind, StoryKind::Story);
    assert_eq!(story.pages, Some(24));
    assert_eq!(story.creators.len(), 1);
    assert_eq!(story.characters.len(), 1);
}

#[test]
fn details_are_repeatable() {
    let extractor = Extractor::from_html(DETAIL);
    assert_eq!(extractor.details(), extractor.details());
}

#[test]
fn empty_markup_falls_back_to_defaults() {
    let (details, diagnostics) = Extractor::from_html("").details_with_diagnostics();
    assert_eq!(details.id, 0);
    assert_eq!(details.title, "");
    assert_eq!(details.price, 0.0);
    assert_eq!(details.pages, 0);
    assert_eq!(details.upc, None);
    assert!(details.creators.is_empty());
    assert!(details.stories.is_empty());
    for anchor in ["title", "canonical url", "format", "rating score", "creators", "variants"] {
        assert!(diagnostics.contains(anchor), "{anchor} should be reported missing");
    }
    assert!(extract_listing("<p>Nothing released this week.</p>").is_empty());
}

#[cfg(feature = "serde")]
#[test]
fn serializes_with_camel_case_keys() {
    let listing = serde_json::to_value(extract_listing(LISTING)).unwrap();
    assert!(listing[0].get("variantId").is_none());
    assert_eq!(listing[1]["variantId"], 7712055);
    assert_eq!(listing[1]["parentId"], 7712001);
    assert_eq!(listing[1]["titlePath"], "absolute-batman-1");
    assert_eq!(listing[0]["date"], "2024-10-09");

    let details = serde_json::to_value(extract_details(DETAIL)).unwrap();
    assert_eq!(details["releaseDate"], "2011-09-21");
    assert_eq!(details["ratingCount"], 1523);
    assert_eq!(details["ratingText"], "Very Good");
    assert_eq!(details["collected"], 12097);
    assert_eq!(details["creators"][2]["type"], "cover");
    assert_eq!(details["stories"][0]["type"], "Story");
}
