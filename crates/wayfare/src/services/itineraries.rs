use std::sync::Arc;

use wayfare_core::content::Itinerary;
use wayfare_core::storage::{ItineraryRepository, Page, PageRequest};

use crate::enrichment::EnrichmentCoordinator;
use crate::error::{Result, ServiceError};

/// Itineraries with authors resolved.
#[derive(Clone)]
pub struct ItineraryService {
    itineraries: Arc<dyn ItineraryRepository>,
    enrichment: EnrichmentCoordinator,
}

impl ItineraryService {
    pub fn new(
        itineraries: Arc<dyn ItineraryRepository>,
        enrichment: EnrichmentCoordinator,
    ) -> Self {
        Self {
            itineraries,
            enrichment,
        }
    }

    /// Lists itineraries without their stops.
    pub async fn list_itineraries(&self, page: PageRequest) -> Result<Page<Itinerary>> {
        let mut result = self.itineraries.list_itineraries(page).await?;
        result.items = self
            .enrichment
            .enrich(std::mem::take(&mut result.items))
            .await?;
        Ok(result)
    }

    /// Gets an itinerary with its stops, activities and engagement counts.
    pub async fn get_itinerary(&self, id: &str) -> Result<Itinerary> {
        let mut itinerary = self
            .itineraries
            .get_itinerary(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Itinerary", id))?;

        let (likes, comments) = tokio::try_join!(
            self.itineraries.count_itinerary_likes(id),
            self.itineraries.count_itinerary_comments(id),
        )?;
        itinerary.likes_count = Some(likes);
        itinerary.comments_count = Some(comments);

        Ok(self.enrichment.enrich_one(itinerary).await?)
    }
}
