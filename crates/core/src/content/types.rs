use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::refs::{IdentityRefs, UserRef};

/// A travel story written by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub id: String,
    pub title: String,
    /// Full body. List queries leave this empty.
    pub content: Option<String>,
    pub location: String,
    pub author: UserRef,
    #[serde(default)]
    pub tags: Vec<String>,
    pub likes_count: Option<u32>,
    pub comments_count: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Story {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        location: impl Into<String>,
        author: UserRef,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: None,
            location: location.into(),
            author,
            tags: Vec::new(),
            likes_count: None,
            comments_count: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// A comment left on a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub story_id: String,
    pub author: UserRef,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(
        id: impl Into<String>,
        story_id: impl Into<String>,
        author: UserRef,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            story_id: story_id.into(),
            author,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// One destination within an itinerary, with its planned activities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryStop {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub activities: Vec<String>,
}

/// A planned trip made of one or more stops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Itinerary {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub author: UserRef,
    #[serde(default)]
    pub destinations: Vec<ItineraryStop>,
    pub likes_count: Option<u32>,
    pub comments_count: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Itinerary {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        author: UserRef,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            start_date,
            end_date,
            author,
            destinations: Vec::new(),
            likes_count: None,
            comments_count: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    pub fn with_stop(mut self, stop: ItineraryStop) -> Self {
        self.destinations.push(stop);
        self
    }
}

/// A short piece of travel advice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tip {
    pub id: String,
    pub title: String,
    pub category: String,
    pub content: Option<String>,
    pub author: UserRef,
    pub created_at: DateTime<Utc>,
}

impl Tip {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
        author: UserRef,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: category.into(),
            content: None,
            author,
            created_at: Utc::now(),
        }
    }
}

/// A direct message between two users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender: UserRef,
    pub recipient: UserRef,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(
        id: impl Into<String>,
        sender: UserRef,
        recipient: UserRef,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            sender,
            recipient,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Any content item that carries user references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentItem {
    Story(Story),
    Comment(Comment),
    Itinerary(Itinerary),
    Tip(Tip),
    Message(Message),
}

impl IdentityRefs for Story {
    fn user_refs(&self) -> Vec<&UserRef> {
        vec![&self.author]
    }

    fn user_refs_mut(&mut self) -> Vec<&mut UserRef> {
        vec![&mut self.author]
    }
}

impl IdentityRefs for Comment {
    fn user_refs(&self) -> Vec<&UserRef> {
        vec![&self.author]
    }

    fn user_refs_mut(&mut self) -> Vec<&mut UserRef> {
        vec![&mut self.author]
    }
}

impl IdentityRefs for Itinerary {
    fn user_refs(&self) -> Vec<&UserRef> {
        vec![&self.author]
    }

    fn user_refs_mut(&mut self) -> Vec<&mut UserRef> {
        vec![&mut self.author]
    }
}

impl IdentityRefs for Tip {
    fn user_refs(&self) -> Vec<&UserRef> {
        vec![&self.author]
    }

    fn user_refs_mut(&mut self) -> Vec<&mut UserRef> {
        vec![&mut self.author]
    }
}

impl IdentityRefs for Message {
    fn user_refs(&self) -> Vec<&UserRef> {
        vec![&self.sender, &self.recipient]
    }

    fn user_refs_mut(&mut self) -> Vec<&mut UserRef> {
        vec![&mut self.sender, &mut self.recipient]
    }
}

impl IdentityRefs for ContentItem {
    fn user_refs(&self) -> Vec<&UserRef> {
        match self {
            ContentItem::Story(s) => s.user_refs(),
            ContentItem::Comment(c) => c.user_refs(),
            ContentItem::Itinerary(i) => i.user_refs(),
            ContentItem::Tip(t) => t.user_refs(),
            ContentItem::Message(m) => m.user_refs(),
        }
    }

    fn user_refs_mut(&mut self) -> Vec<&mut UserRef> {
        match self {
            ContentItem::Story(s) => s.user_refs_mut(),
            ContentItem::Comment(c) => c.user_refs_mut(),
            ContentItem::Itinerary(i) => i.user_refs_mut(),
            ContentItem::Tip(t) => t.user_refs_mut(),
            ContentItem::Message(m) => m.user_refs_mut(),
        }
    }
}

/// A travel destination as listed in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub country: String,
    pub description: Option<String>,
    pub best_time_to_visit: Option<String>,
    pub average_cost_per_day: Option<f64>,
    pub currency: Option<String>,
    pub language: Option<String>,
}

impl Destination {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            country: country.into(),
            description: None,
            best_time_to_visit: None,
            average_cost_per_day: None,
            currency: None,
            language: None,
        }
    }
}

/// A destination ranked by recent activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingDestination {
    pub id: String,
    pub name: String,
    pub country: String,
    pub score: u32,
}

/// One page of trending destinations plus the total number ranked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingDestinations {
    pub destinations: Vec<TrendingDestination>,
    pub total: u64,
}

/// The story of a user with the most likes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularStory {
    pub id: String,
    pub title: String,
    pub likes_count: u32,
}

/// The itinerary of a user with the most likes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularItinerary {
    pub id: String,
    pub title: String,
    pub likes_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_declares_sender_and_recipient() {
        let message = Message::new("m1", UserRef::new("a"), UserRef::new("b"), "hi");
        let ids: Vec<&str> = message.user_refs().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_content_item_delegates_refs() {
        let item = ContentItem::Tip(Tip::new("t1", "Pack light", "packing", UserRef::new("u7")));
        let refs = item.user_refs();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].id.as_str(), "u7");
        assert!(!item.is_enriched());
    }

    #[test]
    fn test_content_item_serializes_with_kind_tag() {
        let item = ContentItem::Comment(Comment::new("c1", "s1", UserRef::new("u1"), "Nice"));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["kind"], "comment");
        assert_eq!(json["story_id"], "s1");
    }

    #[test]
    fn test_story_builder() {
        let story = Story::new("s1", "Lisbon", "Portugal", UserRef::new("u1"))
            .with_content("Trams and tiles")
            .with_tags(vec!["city".to_string()]);

        assert_eq!(story.content.as_deref(), Some("Trams and tiles"));
        assert_eq!(story.tags, vec!["city".to_string()]);
        assert!(story.likes_count.is_none());
    }
}
