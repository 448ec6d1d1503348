//! In-memory repository implementation.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use wayfare_core::content::{
    Comment, Destination, Itinerary, Message, PopularItinerary, PopularStory, Story, Tip,
    TrendingDestination, TrendingDestinations,
};
use wayfare_core::identity::UserId;
use wayfare_core::storage::{
    CommunicationRepository, DestinationRepository, ItineraryRepository, Page, PageRequest,
    RepositoryError, Result, StoryRepository,
};

/// A query that [`InMemoryRepository::fail_query`] can make fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailingQuery {
    ListStories,
    GetStory,
    ListComments,
    CountStories,
    CountLikesReceived,
    CountCommentsReceived,
    CountStoryLikes,
    CountStoryComments,
    MostPopularStory,
    ListItineraries,
    GetItinerary,
    CountItineraries,
    CountCountriesVisited,
    CountItineraryLikes,
    CountItineraryComments,
    MostPopularItinerary,
    ListMessages,
    ListTips,
    ListDestinations,
    GetDestination,
    TrendingDestinations,
}

/// In-memory storage backend for testing.
///
/// Rows live in collections wrapped in `Arc<RwLock<_>>`; clones share them.
/// Data is not persisted and will be lost when the last clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    stories: Arc<RwLock<Vec<Story>>>,
    comments: Arc<RwLock<Vec<Comment>>>,
    story_likes: Arc<RwLock<HashMap<String, u32>>>,
    itineraries: Arc<RwLock<Vec<Itinerary>>>,
    itinerary_likes: Arc<RwLock<HashMap<String, u32>>>,
    itinerary_comments: Arc<RwLock<HashMap<String, u32>>>,
    messages: Arc<RwLock<Vec<Message>>>,
    tips: Arc<RwLock<Vec<Tip>>>,
    destinations: Arc<RwLock<Vec<Destination>>>,
    destination_activity: Arc<RwLock<HashMap<String, u32>>>,
    failing: Arc<RwLock<HashSet<FailingQuery>>>,
    trending_queries: Arc<AtomicUsize>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Seed helpers ====================

    pub async fn add_story(&self, story: Story) {
        self.stories.write().await.push(story);
    }

    pub async fn add_comment(&self, comment: Comment) {
        self.comments.write().await.push(comment);
    }

    pub async fn add_story_likes(&self, story_id: &str, likes: u32) {
        *self
            .story_likes
            .write()
            .await
            .entry(story_id.to_string())
            .or_default() += likes;
    }

    pub async fn add_itinerary(&self, itinerary: Itinerary) {
        self.itineraries.write().await.push(itinerary);
    }

    pub async fn add_itinerary_likes(&self, itinerary_id: &str, likes: u32) {
        *self
            .itinerary_likes
            .write()
            .await
            .entry(itinerary_id.to_string())
            .or_default() += likes;
    }

    pub async fn add_itinerary_comments(&self, itinerary_id: &str, comments: u32) {
        *self
            .itinerary_comments
            .write()
            .await
            .entry(itinerary_id.to_string())
            .or_default() += comments;
    }

    pub async fn add_message(&self, message: Message) {
        self.messages.write().await.push(message);
    }

    pub async fn add_tip(&self, tip: Tip) {
        self.tips.write().await.push(tip);
    }

    pub async fn add_destination(&self, destination: Destination) {
        self.destinations.write().await.push(destination);
    }

    /// Records activity (stories, itinerary stops, likes) for a destination.
    pub async fn add_destination_activity(&self, destination_id: &str, score: u32) {
        *self
            .destination_activity
            .write()
            .await
            .entry(destination_id.to_string())
            .or_default() += score;
    }

    // ==================== Test hooks ====================

    /// Makes every later call of `query` fail with `QueryFailed`.
    pub async fn fail_query(&self, query: FailingQuery) {
        self.failing.write().await.insert(query);
    }

    /// Undoes [`fail_query`](Self::fail_query).
    pub async fn restore_query(&self, query: FailingQuery) {
        self.failing.write().await.remove(&query);
    }

    /// Number of times the trending aggregate has been computed.
    pub fn trending_queries(&self) -> usize {
        self.trending_queries.load(Ordering::SeqCst)
    }

    async fn check(&self, query: FailingQuery) -> Result<()> {
        if self.failing.read().await.contains(&query) {
            return Err(RepositoryError::QueryFailed(format!(
                "{query:?} failed (injected)"
            )));
        }
        Ok(())
    }

    async fn story_likes(&self, story_id: &str) -> u32 {
        self.story_likes
            .read()
            .await
            .get(story_id)
            .copied()
            .unwrap_or(0)
    }

    async fn itinerary_likes(&self, itinerary_id: &str) -> u32 {
        self.itinerary_likes
            .read()
            .await
            .get(itinerary_id)
            .copied()
            .unwrap_or(0)
    }

    async fn story_ids_by(&self, user_id: &UserId) -> HashSet<String> {
        self.stories
            .read()
            .await
            .iter()
            .filter(|s| &s.author.id == user_id)
            .map(|s| s.id.clone())
            .collect()
    }
}

/// Slices `items` according to `request`.
fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total = items.len() as u64;
    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let items = items
        .into_iter()
        .skip(offset)
        .take(request.limit() as usize)
        .collect();
    Page::new(items, total, request)
}

/// Orders rows newest first; rows with equal timestamps keep the most
/// recently inserted first.
fn newest_first<T: Clone>(rows: &[T], created_at: impl Fn(&T) -> chrono::DateTime<chrono::Utc>) -> Vec<T> {
    let mut rows: Vec<T> = rows.iter().rev().cloned().collect();
    rows.sort_by_key(|row| std::cmp::Reverse(created_at(row)));
    rows
}

#[async_trait]
impl StoryRepository for InMemoryRepository {
    async fn list_stories(&self, page: PageRequest) -> Result<Page<Story>> {
        self.check(FailingQuery::ListStories).await?;
        let stories = self.stories.read().await;
        let mut rows = newest_first(&stories, |s| s.created_at);
        for story in &mut rows {
            story.content = None;
        }
        Ok(paginate(rows, page))
    }

    async fn get_story(&self, id: &str) -> Result<Option<Story>> {
        self.check(FailingQuery::GetStory).await?;
        let stories = self.stories.read().await;
        Ok(stories.iter().find(|s| s.id == id).cloned())
    }

    async fn list_comments(&self, story_id: &str, page: PageRequest) -> Result<Page<Comment>> {
        self.check(FailingQuery::ListComments).await?;
        let comments = self.comments.read().await;
        let rows = comments
            .iter()
            .filter(|c| c.story_id == story_id)
            .cloned()
            .collect();
        Ok(paginate(rows, page))
    }

    async fn count_stories(&self, user_id: &UserId) -> Result<u32> {
        self.check(FailingQuery::CountStories).await?;
        Ok(self.story_ids_by(user_id).await.len() as u32)
    }

    async fn count_likes_received(&self, user_id: &UserId) -> Result<u32> {
        self.check(FailingQuery::CountLikesReceived).await?;
        let ids = self.story_ids_by(user_id).await;
        let likes = self.story_likes.read().await;
        Ok(ids.iter().filter_map(|id| likes.get(id)).sum())
    }

    async fn count_comments_received(&self, user_id: &UserId) -> Result<u32> {
        self.check(FailingQuery::CountCommentsReceived).await?;
        let ids = self.story_ids_by(user_id).await;
        let comments = self.comments.read().await;
        Ok(comments.iter().filter(|c| ids.contains(&c.story_id)).count() as u32)
    }

    async fn count_story_likes(&self, story_id: &str) -> Result<u32> {
        self.check(FailingQuery::CountStoryLikes).await?;
        Ok(self.story_likes(story_id).await)
    }

    async fn count_story_comments(&self, story_id: &str) -> Result<u32> {
        self.check(FailingQuery::CountStoryComments).await?;
        let comments = self.comments.read().await;
        Ok(comments.iter().filter(|c| c.story_id == story_id).count() as u32)
    }

    async fn most_popular_story(&self, user_id: &UserId) -> Result<Option<PopularStory>> {
        self.check(FailingQuery::MostPopularStory).await?;
        let stories: Vec<Story> = self
            .stories
            .read()
            .await
            .iter()
            .filter(|s| &s.author.id == user_id)
            .cloned()
            .collect();

        let mut best: Option<PopularStory> = None;
        for story in stories {
            let likes_count = self.story_likes(&story.id).await;
            if best.as_ref().is_none_or(|b| likes_count > b.likes_count) {
                best = Some(PopularStory {
                    id: story.id,
                    title: story.title,
                    likes_count,
                });
            }
        }
        Ok(best)
    }
}

#[async_trait]
impl ItineraryRepository for InMemoryRepository {
    async fn list_itineraries(&self, page: PageRequest) -> Result<Page<Itinerary>> {
        self.check(FailingQuery::ListItineraries).await?;
        let itineraries = self.itineraries.read().await;
        let mut rows = newest_first(&itineraries, |i| i.created_at);
        for itinerary in &mut rows {
            itinerary.destinations.clear();
        }
        Ok(paginate(rows, page))
    }

    async fn get_itinerary(&self, id: &str) -> Result<Option<Itinerary>> {
        self.check(FailingQuery::GetItinerary).await?;
        let itineraries = self.itineraries.read().await;
        Ok(itineraries.iter().find(|i| i.id == id).cloned())
    }

    async fn count_itineraries(&self, user_id: &UserId) -> Result<u32> {
        self.check(FailingQuery::CountItineraries).await?;
        let itineraries = self.itineraries.read().await;
        Ok(itineraries
            .iter()
            .filter(|i| &i.author.id == user_id)
            .count() as u32)
    }

    async fn count_countries_visited(&self, user_id: &UserId) -> Result<u32> {
        self.check(FailingQuery::CountCountriesVisited).await?;
        let itineraries = self.itineraries.read().await;
        let visited: BTreeSet<&str> = itineraries
            .iter()
            .filter(|i| &i.author.id == user_id)
            .flat_map(|i| i.destinations.iter().map(|stop| stop.name.as_str()))
            .collect();
        Ok(visited.len() as u32)
    }

    async fn count_itinerary_likes(&self, itinerary_id: &str) -> Result<u32> {
        self.check(FailingQuery::CountItineraryLikes).await?;
        Ok(self.itinerary_likes(itinerary_id).await)
    }

    async fn count_itinerary_comments(&self, itinerary_id: &str) -> Result<u32> {
        self.check(FailingQuery::CountItineraryComments).await?;
        let comments = self.itinerary_comments.read().await;
        Ok(comments.get(itinerary_id).copied().unwrap_or(0))
    }

    async fn most_popular_itinerary(&self, user_id: &UserId) -> Result<Option<PopularItinerary>> {
        self.check(FailingQuery::MostPopularItinerary).await?;
        let itineraries: Vec<Itinerary> = self
            .itineraries
            .read()
            .await
            .iter()
            .filter(|i| &i.author.id == user_id)
            .cloned()
            .collect();

        let mut best: Option<PopularItinerary> = None;
        for itinerary in itineraries {
            let likes_count = self.itinerary_likes(&itinerary.id).await;
            if best.as_ref().is_none_or(|b| likes_count > b.likes_count) {
                best = Some(PopularItinerary {
                    id: itinerary.id,
                    title: itinerary.title,
                    likes_count,
                });
            }
        }
        Ok(best)
    }
}

#[async_trait]
impl CommunicationRepository for InMemoryRepository {
    async fn list_messages(&self, page: PageRequest) -> Result<Page<Message>> {
        self.check(FailingQuery::ListMessages).await?;
        let messages = self.messages.read().await;
        Ok(paginate(messages.clone(), page))
    }

    async fn list_tips(&self, category: Option<&str>, page: PageRequest) -> Result<Page<Tip>> {
        self.check(FailingQuery::ListTips).await?;
        let tips = self.tips.read().await;
        let rows = tips
            .iter()
            .filter(|t| category.is_none_or(|c| t.category == c))
            .cloned()
            .collect();
        Ok(paginate(rows, page))
    }
}

#[async_trait]
impl DestinationRepository for InMemoryRepository {
    async fn list_destinations(
        &self,
        query: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Destination>> {
        self.check(FailingQuery::ListDestinations).await?;
        let destinations = self.destinations.read().await;
        let rows = destinations
            .iter()
            .filter(|d| query.is_none_or(|name| d.name == name))
            .cloned()
            .collect();
        Ok(paginate(rows, page))
    }

    async fn get_destination(&self, id: &str) -> Result<Option<Destination>> {
        self.check(FailingQuery::GetDestination).await?;
        let destinations = self.destinations.read().await;
        Ok(destinations.iter().find(|d| d.id == id).cloned())
    }

    async fn trending_destinations(&self, page: PageRequest) -> Result<TrendingDestinations> {
        self.check(FailingQuery::TrendingDestinations).await?;
        self.trending_queries.fetch_add(1, Ordering::SeqCst);

        let destinations = self.destinations.read().await;
        let activity = self.destination_activity.read().await;

        // Destinations without activity are not ranked.
        let mut ranked: Vec<TrendingDestination> = destinations
            .iter()
            .filter_map(|d| {
                let score = activity.get(&d.id).copied().unwrap_or(0);
                (score > 0).then(|| TrendingDestination {
                    id: d.id.clone(),
                    name: d.name.clone(),
                    country: d.country.clone(),
                    score,
                })
            })
            .collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));

        let page = paginate(ranked, page);
        Ok(TrendingDestinations {
            destinations: page.items,
            total: page.total,
        })
    }
}
