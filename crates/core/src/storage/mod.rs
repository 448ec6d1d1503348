mod error;
mod traits;
mod types;

pub use error::{PageRequestError, RepositoryError, Result};
pub use traits::{
    CommunicationRepository, DestinationRepository, ItineraryRepository, StoryRepository,
};
pub use types::{Page, PageRequest};
