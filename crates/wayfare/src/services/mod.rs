//! Read services that compose storage, enrichment and caching.
//!
//! Every list and detail operation hands back items whose user references
//! are fully resolved, or an error. Nothing partially enriched is returned.

mod communication;
mod destinations;
mod itineraries;
mod stories;

pub use communication::CommunicationService;
pub use destinations::DestinationService;
pub use itineraries::ItineraryService;
pub use stories::StoryService;

use wayfare_core::storage::PageRequest;

use crate::error::Result;

/// Builds a page request from optional query parameters.
///
/// Missing values fall back to `PageRequest::default()`. A page of zero or a
/// zero limit is rejected with `ServiceError::InvalidPage`.
pub fn page_request(page: Option<u32>, limit: Option<u32>) -> Result<PageRequest> {
    let defaults = PageRequest::default();
    Ok(PageRequest::new(
        page.unwrap_or(defaults.page()),
        limit.unwrap_or(defaults.limit()),
    )?)
}
