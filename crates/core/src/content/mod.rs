mod error;
mod operations;
mod refs;
mod types;

pub use error::EnrichmentError;
pub use operations::{apply_identities, collect_identifiers};
pub use refs::{IdentityRefs, UserRef};
pub use types::{
    Comment, ContentItem, Destination, Itinerary, ItineraryStop, Message, PopularItinerary,
    PopularStory, Story, Tip, TrendingDestination, TrendingDestinations,
};
