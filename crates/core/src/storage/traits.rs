use async_trait::async_trait;

use crate::content::{
    Comment, Destination, Itinerary, Message, PopularItinerary, PopularStory, Story, Tip,
    TrendingDestinations,
};
use crate::identity::UserId;

use super::{Page, PageRequest, Result};

/// Read access to stories, their comments and their engagement counts.
#[async_trait]
pub trait StoryRepository: Send + Sync {
    /// Lists stories, newest first. Authors are unresolved.
    async fn list_stories(&self, page: PageRequest) -> Result<Page<Story>>;

    /// Gets a story with its full content.
    async fn get_story(&self, id: &str) -> Result<Option<Story>>;

    /// Lists the comments of a story in posting order.
    async fn list_comments(&self, story_id: &str, page: PageRequest) -> Result<Page<Comment>>;

    /// Counts the stories written by a user.
    async fn count_stories(&self, user_id: &UserId) -> Result<u32>;

    /// Counts the likes received on all stories of a user.
    async fn count_likes_received(&self, user_id: &UserId) -> Result<u32>;

    /// Counts the comments received on all stories of a user.
    async fn count_comments_received(&self, user_id: &UserId) -> Result<u32>;

    /// Counts the likes on a single story.
    async fn count_story_likes(&self, story_id: &str) -> Result<u32>;

    /// Counts the comments on a single story.
    async fn count_story_comments(&self, story_id: &str) -> Result<u32>;

    /// Gets the most liked story of a user, if they have written any.
    async fn most_popular_story(&self, user_id: &UserId) -> Result<Option<PopularStory>>;
}

/// Read access to itineraries.
#[async_trait]
pub trait ItineraryRepository: Send + Sync {
    /// Lists itineraries without their stops. Authors are unresolved.
    async fn list_itineraries(&self, page: PageRequest) -> Result<Page<Itinerary>>;

    /// Gets an itinerary with its stops and their activities.
    async fn get_itinerary(&self, id: &str) -> Result<Option<Itinerary>>;

    /// Counts the itineraries planned by a user.
    async fn count_itineraries(&self, user_id: &UserId) -> Result<u32>;

    /// Counts the distinct stop names across a user's itineraries.
    ///
    /// Stops carry a destination name and no country, so this is a count of
    /// places rather than countries even though it feeds
    /// `total_countries_visited`.
    async fn count_countries_visited(&self, user_id: &UserId) -> Result<u32>;

    /// Counts the likes on a single itinerary.
    async fn count_itinerary_likes(&self, itinerary_id: &str) -> Result<u32>;

    /// Counts the comments on a single itinerary.
    async fn count_itinerary_comments(&self, itinerary_id: &str) -> Result<u32>;

    /// Gets the most liked itinerary of a user, if they have planned any.
    async fn most_popular_itinerary(&self, user_id: &UserId) -> Result<Option<PopularItinerary>>;
}

/// Read access to messages and travel tips.
#[async_trait]
pub trait CommunicationRepository: Send + Sync {
    /// Lists messages in sending order.
    async fn list_messages(&self, page: PageRequest) -> Result<Page<Message>>;

    /// Lists tips, optionally restricted to one category.
    async fn list_tips(&self, category: Option<&str>, page: PageRequest) -> Result<Page<Tip>>;
}

/// Read access to the destination catalogue.
#[async_trait]
pub trait DestinationRepository: Send + Sync {
    /// Lists destinations, optionally filtered by exact name.
    async fn list_destinations(
        &self,
        query: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Destination>>;

    /// Gets a destination by its ID.
    async fn get_destination(&self, id: &str) -> Result<Option<Destination>>;

    /// Ranks destinations by recent activity. This is the expensive aggregate
    /// that callers are expected to cache.
    async fn trending_destinations(&self, page: PageRequest) -> Result<TrendingDestinations>;
}
