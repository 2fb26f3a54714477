mod consts;
mod diagnostics;
pub mod error;
mod extract;
pub mod models;
mod normalize;
pub mod parse;

use tracing::instrument;

pub use crate::consts::BASE_URL;
pub use crate::diagnostics::Diagnostics;
pub use crate::extract::{Extractor, extract_listing, extract_listing_with_diagnostics};
use crate::models::ComicDetails;
pub use crate::normalize::normalize;

/// Easy, top-level entrypoint for the extraction of [`ComicDetails`] from a
/// raw detail page.
///
/// - Normalizes the markup before parsing it, and
/// - Never fails: missing or malformed fields fall back to their defaults.
///
/// Use [`Extractor::details_with_diagnostics`] to find out which parts of the
/// page could not be located.
#[instrument(skip(html), fields(html_size = html.as_ref().len()))]
pub fn extract_details(html: impl AsRef<str>) -> ComicDetails {
    Extractor::from_html(html.as_ref()).details()
}
