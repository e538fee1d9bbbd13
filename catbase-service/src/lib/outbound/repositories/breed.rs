use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::breed::errors::BreedError;
use crate::domain::breed::models::Breed;
use crate::domain::breed::models::BreedId;
use crate::domain::breed::models::BreedName;
use crate::domain::breed::models::BreedProfile;
use crate::domain::breed::models::BreedQuery;
use crate::domain::breed::models::BreedView;
use crate::domain::breed::models::NewBreed;
use crate::domain::breed::ports::BreedRepository;
use crate::domain::reaction::models::ReactionKind;
use crate::domain::user::models::UserId;

pub struct PostgresBreedRepository {
    pool: PgPool,
}

impl PostgresBreedRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BreedRow {
    id: i64,
    name: String,
    origin: String,
    history: String,
    appearance: String,
    temperament: String,
    care_instructions: String,
    image_url: String,
    like_count: i64,
    dislike_count: i64,
    discussion_count: i64,
    view_count: i64,
    average_ratings: Json<BTreeMap<String, f64>>,
    created_by: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[sqlx(default)]
    user_reaction: Option<String>,
}

impl TryFrom<BreedRow> for BreedView {
    type Error = BreedError;

    fn try_from(r: BreedRow) -> Result<Self, Self::Error> {
        let user_reaction = r
            .user_reaction
            .map(|kind| kind.parse::<ReactionKind>())
            .transpose()
            .map_err(|e| BreedError::DatabaseError(e.to_string()))?;

        Ok(BreedView {
            breed: Breed {
                id: BreedId(r.id),
                name: BreedName::new(r.name)?,
                profile: BreedProfile {
                    origin: r.origin,
                    history: r.history,
                    appearance: r.appearance,
                    temperament: r.temperament,
                    care_instructions: r.care_instructions,
                    image_url: r.image_url,
                },
                like_count: r.like_count,
                dislike_count: r.dislike_count,
                discussion_count: r.discussion_count,
                view_count: r.view_count,
                average_ratings: r.average_ratings.0,
                created_by: r.created_by.map(UserId),
                created_at: r.created_at,
                updated_at: r.updated_at,
            },
            user_reaction,
        })
    }
}

const BREED_COLUMNS: &str = r#"
    cb.id, cb.name, cb.origin, cb.history, cb.appearance, cb.temperament,
    cb.care_instructions, cb.image_url,
    cb.like_count, cb.dislike_count, cb.discussion_count, cb.view_count,
    cb.average_ratings, cb.created_by, cb.created_at, cb.updated_at
"#;

fn database_error(e: sqlx::Error) -> BreedError {
    BreedError::DatabaseError(e.to_string())
}

#[async_trait]
impl BreedRepository for PostgresBreedRepository {
    async fn list(
        &self,
        query: &BreedQuery,
        viewer: Option<UserId>,
    ) -> Result<Vec<BreedView>, BreedError> {
        let rows: Vec<BreedRow> = sqlx::query_as(&format!(
            r#"
            SELECT {BREED_COLUMNS}, r.reaction_type AS user_reaction
            FROM cat_breeds cb
            LEFT JOIN reactions r
                ON r.subject_type = 'breed' AND r.subject_id = cb.id AND r.user_id = $1
            WHERE $2::text IS NULL OR cb.name ILIKE '%' || $2 || '%'
            ORDER BY cb.name ASC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(viewer.map(|id| id.0))
        .bind(query.search.as_deref())
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(BreedView::try_from).collect()
    }

    async fn find_by_id(
        &self,
        id: BreedId,
        viewer: Option<UserId>,
    ) -> Result<Option<BreedView>, BreedError> {
        let row: Option<BreedRow> = sqlx::query_as(&format!(
            r#"
            SELECT {BREED_COLUMNS}, r.reaction_type AS user_reaction
            FROM cat_breeds cb
            LEFT JOIN reactions r
                ON r.subject_type = 'breed' AND r.subject_id = cb.id AND r.user_id = $1
            WHERE cb.id = $2
            "#
        ))
        .bind(viewer.map(|id| id.0))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(BreedView::try_from).transpose()
    }

    async fn increment_views(&self, id: BreedId) -> Result<(), BreedError> {
        sqlx::query("UPDATE cat_breeds SET view_count = view_count + 1 WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(())
    }

    async fn create(&self, breed: NewBreed) -> Result<Breed, BreedError> {
        let row: BreedRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO cat_breeds AS cb
                (name, origin, history, appearance, temperament, care_instructions,
                 image_url, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {BREED_COLUMNS}
            "#
        ))
        .bind(breed.name.as_str())
        .bind(&breed.profile.origin)
        .bind(&breed.profile.history)
        .bind(&breed.profile.appearance)
        .bind(&breed.profile.temperament)
        .bind(&breed.profile.care_instructions)
        .bind(&breed.profile.image_url)
        .bind(breed.created_by.0)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(BreedView::try_from(row)?.breed)
    }

    async fn update(&self, breed: Breed) -> Result<Breed, BreedError> {
        let row: Option<BreedRow> = sqlx::query_as(&format!(
            r#"
            UPDATE cat_breeds AS cb
            SET name = $2, origin = $3, history = $4, appearance = $5,
                temperament = $6, care_instructions = $7, image_url = $8,
                updated_at = NOW()
            WHERE cb.id = $1
            RETURNING {BREED_COLUMNS}
            "#
        ))
        .bind(breed.id.0)
        .bind(breed.name.as_str())
        .bind(&breed.profile.origin)
        .bind(&breed.profile.history)
        .bind(&breed.profile.appearance)
        .bind(&breed.profile.temperament)
        .bind(&breed.profile.care_instructions)
        .bind(&breed.profile.image_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        match row {
            Some(row) => Ok(BreedView::try_from(row)?.breed),
            None => Err(BreedError::NotFound(breed.id.to_string())),
        }
    }

    async fn delete(&self, id: BreedId) -> Result<(), BreedError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        // Reaction rows are polymorphic, so no foreign key cascades them.
        sqlx::query(
            r#"
            DELETE FROM reactions
            WHERE (subject_type = 'breed' AND subject_id = $1)
               OR (subject_type = 'discussion'
                   AND subject_id IN (SELECT id FROM discussions WHERE breed_id = $1))
            "#,
        )
        .bind(id.0)
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        let result = sqlx::query("DELETE FROM cat_breeds WHERE id = $1")
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(BreedError::NotFound(id.to_string()));
        }

        tx.commit().await.map_err(database_error)?;
        Ok(())
    }
}
