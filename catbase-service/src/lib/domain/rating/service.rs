use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::breed::models::BreedId;
use crate::domain::rating::models::aggregate;
use crate::domain::rating::models::AggregateRating;
use crate::rating::errors::RatingError;
use crate::rating::ports::RatingRepository;
use crate::rating::ports::RatingServicePort;

pub struct RatingService<RR>
where
    RR: RatingRepository,
{
    repository: Arc<RR>,
}

impl<RR> RatingService<RR>
where
    RR: RatingRepository,
{
    pub fn new(repository: Arc<RR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<RR> RatingServicePort for RatingService<RR>
where
    RR: RatingRepository,
{
    async fn recompute(&self, breed_id: BreedId) -> Result<AggregateRating, RatingError> {
        let entries = self.repository.contributing_ratings(breed_id).await?;
        let result = aggregate(&entries);
        self.repository.store_aggregate(breed_id, &result).await?;

        tracing::debug!(
            breed_id = %breed_id,
            contributing = result.count,
            "Recomputed breed ratings"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use mockall::mock;

    use super::*;
    use crate::domain::rating::models::Ratings;

    mock! {
        pub TestRatingRepository {}

        #[async_trait]
        impl RatingRepository for TestRatingRepository {
            async fn contributing_ratings(&self, breed_id: BreedId) -> Result<Vec<Ratings>, RatingError>;
            async fn store_aggregate(&self, breed_id: BreedId, aggregate: &AggregateRating) -> Result<(), RatingError>;
        }
    }

    fn friendliness(value: u8) -> Ratings {
        let mut map = BTreeMap::new();
        map.insert("friendliness".to_string(), value);
        Ratings::from(map)
    }

    #[tokio::test]
    async fn test_recompute_stores_fresh_aggregate() {
        let mut repository = MockTestRatingRepository::new();
        repository
            .expect_contributing_ratings()
            .returning(|_| Ok(vec![friendliness(5), friendliness(3)]));
        repository
            .expect_store_aggregate()
            .withf(|breed_id, aggregate| {
                *breed_id == BreedId(3)
                    && aggregate.count == 2
                    && aggregate.averages.get("friendliness") == Some(&4.0)
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = RatingService::new(Arc::new(repository));
        let result = service.recompute(BreedId(3)).await.unwrap();
        assert_eq!(result.count, 2);
    }

    #[tokio::test]
    async fn test_recompute_propagates_store_failure() {
        let mut repository = MockTestRatingRepository::new();
        repository
            .expect_contributing_ratings()
            .returning(|_| Ok(vec![]));
        repository
            .expect_store_aggregate()
            .returning(|_, _| Err(RatingError::DatabaseError("deadlock detected".to_string())));

        let service = RatingService::new(Arc::new(repository));
        let result = service.recompute(BreedId(3)).await;
        assert!(matches!(result, Err(RatingError::DatabaseError(_))));
    }
}
