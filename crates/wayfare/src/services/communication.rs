use std::sync::Arc;

use wayfare_core::content::{Message, Tip};
use wayfare_core::identity::UserId;
use wayfare_core::stats::CompositeStatistics;
use wayfare_core::storage::{CommunicationRepository, Page, PageRequest};

use crate::enrichment::EnrichmentCoordinator;
use crate::error::Result;
use crate::stats::StatisticsAggregator;

/// Messages, tips and per-user statistics.
#[derive(Clone)]
pub struct CommunicationService {
    communication: Arc<dyn CommunicationRepository>,
    enrichment: EnrichmentCoordinator,
    statistics: StatisticsAggregator,
}

impl CommunicationService {
    pub fn new(
        communication: Arc<dyn CommunicationRepository>,
        enrichment: EnrichmentCoordinator,
        statistics: StatisticsAggregator,
    ) -> Self {
        Self {
            communication,
            enrichment,
            statistics,
        }
    }

    /// Lists messages. Senders and recipients are resolved in one batch.
    pub async fn list_messages(&self, page: PageRequest) -> Result<Page<Message>> {
        let mut result = self.communication.list_messages(page).await?;
        result.items = self
            .enrichment
            .enrich(std::mem::take(&mut result.items))
            .await?;
        Ok(result)
    }

    pub async fn list_tips(&self, category: Option<&str>, page: PageRequest) -> Result<Page<Tip>> {
        let mut result = self.communication.list_tips(category, page).await?;
        result.items = self
            .enrichment
            .enrich(std::mem::take(&mut result.items))
            .await?;
        Ok(result)
    }

    pub async fn user_statistics(&self, user_id: &UserId) -> Result<CompositeStatistics> {
        Ok(self.statistics.aggregate(user_id).await?)
    }
}
