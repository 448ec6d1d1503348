//! Per-user statistics assembled from independent repository queries.

use std::sync::Arc;

use wayfare_core::identity::UserId;
use wayfare_core::stats::{AggregationError, CompositeStatistics, Result, StatisticsField};
use wayfare_core::storage::{ItineraryRepository, RepositoryError, StoryRepository};

/// Builds [`CompositeStatistics`] for a user.
///
/// Every sub-query runs concurrently. The queries are not retried here and
/// do not share a transaction.
#[derive(Clone)]
pub struct StatisticsAggregator {
    stories: Arc<dyn StoryRepository>,
    itineraries: Arc<dyn ItineraryRepository>,
}

impl StatisticsAggregator {
    pub fn new(stories: Arc<dyn StoryRepository>, itineraries: Arc<dyn ItineraryRepository>) -> Self {
        Self {
            stories,
            itineraries,
        }
    }

    /// Aggregates statistics for `subject`.
    ///
    /// When several sub-queries fail, the one reported is the first in
    /// [`StatisticsField::ALL`] order.
    pub async fn aggregate(&self, subject: &UserId) -> Result<CompositeStatistics> {
        let (
            story_count,
            itinerary_count,
            countries_visited,
            like_count,
            comment_count,
            most_popular_story,
            most_popular_itinerary,
        ) = tokio::join!(
            self.stories.count_stories(subject),
            self.itineraries.count_itineraries(subject),
            self.itineraries.count_countries_visited(subject),
            self.stories.count_likes_received(subject),
            self.stories.count_comments_received(subject),
            self.stories.most_popular_story(subject),
            self.itineraries.most_popular_itinerary(subject),
        );

        let statistics = CompositeStatistics {
            subject: subject.clone(),
            total_stories: field(StatisticsField::StoryCount, story_count)?,
            total_itineraries: field(StatisticsField::ItineraryCount, itinerary_count)?,
            total_countries_visited: field(StatisticsField::CountriesVisited, countries_visited)?,
            total_likes_received: field(StatisticsField::LikeCount, like_count)?,
            total_comments_received: field(StatisticsField::CommentCount, comment_count)?,
            most_popular_story: field(StatisticsField::MostPopularStory, most_popular_story)?,
            most_popular_itinerary: field(
                StatisticsField::MostPopularItinerary,
                most_popular_itinerary,
            )?,
        };

        tracing::debug!(user_id = %subject, "Aggregated user statistics");
        Ok(statistics)
    }
}

/// Tags a sub-query failure with the field it was computing.
fn field<T>(name: StatisticsField, result: std::result::Result<T, RepositoryError>) -> Result<T> {
    result.map_err(|source| {
        tracing::error!(field = %name, error = %source, "Statistics sub-query failed");
        AggregationError::PartialAggregationFailure {
            field: name,
            source,
        }
    })
}
