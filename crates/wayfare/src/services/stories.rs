use std::sync::Arc;

use wayfare_core::content::{Comment, Story};
use wayfare_core::identity::UserId;
use wayfare_core::storage::{Page, PageRequest, StoryRepository};

use crate::enrichment::EnrichmentCoordinator;
use crate::error::{Result, ServiceError};

/// Stories and their comments, with authors resolved.
#[derive(Clone)]
pub struct StoryService {
    stories: Arc<dyn StoryRepository>,
    enrichment: EnrichmentCoordinator,
}

impl StoryService {
    pub fn new(stories: Arc<dyn StoryRepository>, enrichment: EnrichmentCoordinator) -> Self {
        Self {
            stories,
            enrichment,
        }
    }

    pub async fn list_stories(&self, page: PageRequest) -> Result<Page<Story>> {
        let mut result = self.stories.list_stories(page).await?;
        result.items = self
            .enrichment
            .enrich(std::mem::take(&mut result.items))
            .await?;
        Ok(result)
    }

    /// Gets a story with its content, author and engagement counts.
    pub async fn get_story(&self, id: &str) -> Result<Story> {
        let mut story = self
            .stories
            .get_story(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Story", id))?;

        let (likes, comments) = tokio::try_join!(
            self.stories.count_story_likes(id),
            self.stories.count_story_comments(id),
        )?;
        story.likes_count = Some(likes);
        story.comments_count = Some(comments);

        Ok(self.enrichment.enrich_one(story).await?)
    }

    pub async fn list_comments(&self, story_id: &str, page: PageRequest) -> Result<Page<Comment>> {
        let mut result = self.stories.list_comments(story_id, page).await?;
        result.items = self
            .enrichment
            .enrich(std::mem::take(&mut result.items))
            .await?;
        Ok(result)
    }

    /// Counts the stories a user has written.
    pub async fn count_stories(&self, user_id: &UserId) -> Result<u32> {
        Ok(self.stories.count_stories(user_id).await?)
    }

    /// Counts the likes across every story a user has written.
    pub async fn count_likes_received(&self, user_id: &UserId) -> Result<u32> {
        Ok(self.stories.count_likes_received(user_id).await?)
    }

    /// Counts the comments across every story a user has written.
    pub async fn count_comments_received(&self, user_id: &UserId) -> Result<u32> {
        Ok(self.stories.count_comments_received(user_id).await?)
    }
}
