mod character;
mod creator;
mod details;
mod story;
mod summary;
mod variant;

pub use self::character::Character;
pub use self::creator::{Creator, CreatorSource};
pub use self::details::{CommunityRating, ComicDetails, Engagement};
pub use self::story::{Story, StoryKind};
pub use self::summary::{ComicSummary, ListingVariant};
pub use self::variant::Variant;

fn sanitize(s: impl AsRef<str>) -> String {
    s.as_ref().trim().to_lowercase().replace(['/', '-', '_', ' '], "")
}
