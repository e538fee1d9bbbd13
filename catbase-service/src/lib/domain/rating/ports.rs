use async_trait::async_trait;

use crate::domain::breed::models::BreedId;
use crate::domain::rating::models::AggregateRating;
use crate::domain::rating::models::Ratings;
use crate::rating::errors::RatingError;

/// Port for the rating aggregator.
#[async_trait]
pub trait RatingServicePort: Send + Sync + 'static {
    /// Rebuild the breed's average ratings from every contributing discussion.
    ///
    /// Idempotent; running it twice in a row stores the same result.
    async fn recompute(&self, breed_id: BreedId) -> Result<AggregateRating, RatingError>;
}

#[async_trait]
pub trait RatingRepository: Send + Sync + 'static {
    /// Ratings of every non-deleted top-level discussion of the breed that
    /// carries a rating map.
    async fn contributing_ratings(&self, breed_id: BreedId) -> Result<Vec<Ratings>, RatingError>;

    /// Overwrite the breed's denormalised averages and contributing count.
    async fn store_aggregate(
        &self,
        breed_id: BreedId,
        aggregate: &AggregateRating,
    ) -> Result<(), RatingError>;
}
