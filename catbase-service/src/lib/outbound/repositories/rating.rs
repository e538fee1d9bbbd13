use std::collections::BTreeMap;

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::domain::breed::models::BreedId;
use crate::domain::rating::models::AggregateRating;
use crate::domain::rating::models::Ratings;
use crate::domain::rating::ports::RatingRepository;
use crate::rating::errors::RatingError;

pub struct PostgresRatingRepository {
    pool: PgPool,
}

impl PostgresRatingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingRepository for PostgresRatingRepository {
    async fn contributing_ratings(&self, breed_id: BreedId) -> Result<Vec<Ratings>, RatingError> {
        let rows: Vec<Json<BTreeMap<String, u8>>> = sqlx::query_scalar(
            r#"
            SELECT ratings
            FROM discussions
            WHERE breed_id = $1
              AND parent_id IS NULL
              AND is_deleted = FALSE
              AND ratings IS NOT NULL
            "#,
        )
        .bind(breed_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RatingError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(|Json(map)| Ratings::from(map)).collect())
    }

    async fn store_aggregate(
        &self,
        breed_id: BreedId,
        aggregate: &AggregateRating,
    ) -> Result<(), RatingError> {
        sqlx::query(
            r#"
            UPDATE cat_breeds
            SET average_ratings = $2, discussion_count = $3
            WHERE id = $1
            "#,
        )
        .bind(breed_id.0)
        .bind(Json(&aggregate.averages))
        .bind(aggregate.count)
        .execute(&self.pool)
        .await
        .map_err(|e| RatingError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
