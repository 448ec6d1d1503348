use std::fmt;

use serde::{Deserialize, Serialize};

use crate::content::{PopularItinerary, PopularStory};
use crate::identity::UserId;

/// Engagement statistics for one user.
///
/// Each field comes from its own query. The queries are not run in one
/// transaction, so the fields may reflect slightly different instants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeStatistics {
    pub subject: UserId,
    pub total_stories: u32,
    pub total_itineraries: u32,
    pub total_countries_visited: u32,
    pub total_likes_received: u32,
    pub total_comments_received: u32,
    pub most_popular_story: Option<PopularStory>,
    pub most_popular_itinerary: Option<PopularItinerary>,
}

/// Names the sub-query behind each statistics field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatisticsField {
    StoryCount,
    ItineraryCount,
    CountriesVisited,
    LikeCount,
    CommentCount,
    MostPopularStory,
    MostPopularItinerary,
}

impl StatisticsField {
    /// Every field, in the order failures are reported.
    pub const ALL: [StatisticsField; 7] = [
        StatisticsField::StoryCount,
        StatisticsField::ItineraryCount,
        StatisticsField::CountriesVisited,
        StatisticsField::LikeCount,
        StatisticsField::CommentCount,
        StatisticsField::MostPopularStory,
        StatisticsField::MostPopularItinerary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatisticsField::StoryCount => "storyCount",
            StatisticsField::ItineraryCount => "itineraryCount",
            StatisticsField::CountriesVisited => "countriesVisited",
            StatisticsField::LikeCount => "likeCount",
            StatisticsField::CommentCount => "commentCount",
            StatisticsField::MostPopularStory => "mostPopularStory",
            StatisticsField::MostPopularItinerary => "mostPopularItinerary",
        }
    }
}

impl fmt::Display for StatisticsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
