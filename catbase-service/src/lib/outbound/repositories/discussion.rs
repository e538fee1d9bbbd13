use std::collections::BTreeMap;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::discussion::errors::DiscussionError;
use crate::domain::breed::models::BreedId;
use crate::domain::discussion::models::AuthoredDiscussion;
use crate::domain::discussion::models::Discussion;
use crate::domain::discussion::models::DiscussionId;
use crate::domain::discussion::models::DiscussionPage;
use crate::domain::discussion::models::DiscussionView;
use crate::domain::discussion::models::NewDiscussion;
use crate::domain::discussion::models::Removal;
use crate::domain::discussion::models::UpdateDiscussionCommand;
use crate::domain::discussion::ports::DiscussionRepository;
use crate::domain::rating::models::Ratings;
use crate::domain::reaction::models::ReactionKind;
use crate::domain::user::models::UserId;

pub struct PostgresDiscussionRepository {
    pool: PgPool,
}

impl PostgresDiscussionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct DiscussionRow {
    id: i64,
    breed_id: i64,
    user_id: i64,
    username: String,
    parent_id: Option<i64>,
    message: String,
    ratings: Option<Json<BTreeMap<String, u8>>>,
    tags: Option<Json<Vec<String>>>,
    like_count: i64,
    dislike_count: i64,
    reply_count: i64,
    is_deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[sqlx(default)]
    user_reaction: Option<String>,
    #[sqlx(default)]
    breed_name: Option<String>,
}

impl DiscussionRow {
    fn into_discussion(self) -> Discussion {
        Discussion {
            id: DiscussionId(self.id),
            breed_id: BreedId(self.breed_id),
            user_id: UserId(self.user_id),
            username: self.username,
            parent_id: self.parent_id.map(DiscussionId),
            message: self.message,
            ratings: self.ratings.map(|Json(map)| Ratings::from(map)),
            tags: self.tags.map(|Json(tags)| tags).unwrap_or_default(),
            like_count: self.like_count,
            dislike_count: self.dislike_count,
            reply_count: self.reply_count,
            is_deleted: self.is_deleted,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn into_view(mut self, viewer: Option<UserId>) -> Result<DiscussionView, DiscussionError> {
        let user_reaction = self
            .user_reaction
            .take()
            .map(|kind| kind.parse::<ReactionKind>())
            .transpose()
            .map_err(|e| DiscussionError::DatabaseError(e.to_string()))?;
        let discussion = self.into_discussion();

        Ok(DiscussionView {
            is_owner: viewer == Some(discussion.user_id),
            discussion,
            user_reaction,
            replies: Vec::new(),
        })
    }
}

const DISCUSSION_COLUMNS: &str = r#"
    d.id, d.breed_id, d.user_id, u.username, d.parent_id, d.message,
    d.ratings, d.tags, d.like_count, d.dislike_count, d.reply_count,
    d.is_deleted, d.created_at, d.updated_at
"#;

fn database_error(e: sqlx::Error) -> DiscussionError {
    DiscussionError::DatabaseError(e.to_string())
}

fn tags_column(tags: &[String]) -> Option<Json<&[String]>> {
    if tags.is_empty() {
        None
    } else {
        Some(Json(tags))
    }
}

#[async_trait]
impl DiscussionRepository for PostgresDiscussionRepository {
    async fn find_by_id(&self, id: DiscussionId) -> Result<Option<Discussion>, DiscussionError> {
        let row: Option<DiscussionRow> = sqlx::query_as(&format!(
            r#"
            SELECT {DISCUSSION_COLUMNS}
            FROM discussions d
            JOIN users u ON d.user_id = u.id
            WHERE d.id = $1
            "#
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(DiscussionRow::into_discussion))
    }

    async fn create(&self, discussion: NewDiscussion) -> Result<Discussion, DiscussionError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO discussions (breed_id, user_id, parent_id, message, ratings, tags)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(discussion.breed_id.0)
        .bind(discussion.user_id.0)
        .bind(discussion.parent_id.map(|id| id.0))
        .bind(discussion.message.as_str())
        .bind(discussion.ratings.as_ref().map(|r| Json(r.as_map())))
        .bind(tags_column(&discussion.tags))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return DiscussionError::NotFound(format!(
                        "breed {}",
                        discussion.breed_id
                    ));
                }
            }
            database_error(e)
        })?;

        if let Some(parent_id) = discussion.parent_id {
            sqlx::query("UPDATE discussions SET reply_count = reply_count + 1 WHERE id = $1")
                .bind(parent_id.0)
                .execute(&mut *tx)
                .await
                .map_err(database_error)?;
        }

        tx.commit().await.map_err(database_error)?;

        self.find_by_id(DiscussionId(id))
            .await?
            .ok_or_else(|| DiscussionError::NotFound(id.to_string()))
    }

    async fn update(
        &self,
        id: DiscussionId,
        author: UserId,
        command: UpdateDiscussionCommand,
    ) -> Result<Option<Discussion>, DiscussionError> {
        let updated: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE discussions
            SET message = $3, ratings = $4, tags = $5, updated_at = NOW()
            WHERE id = $1 AND user_id = $2 AND is_deleted = FALSE
            RETURNING id
            "#,
        )
        .bind(id.0)
        .bind(author.0)
        .bind(command.message.as_str())
        .bind(command.ratings.as_ref().map(|r| Json(r.as_map())))
        .bind(tags_column(&command.tags))
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        match updated {
            Some(_) => self.find_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn soft_delete(
        &self,
        id: DiscussionId,
        removal: Removal,
    ) -> Result<bool, DiscussionError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let deleted: Option<Option<i64>> = sqlx::query_scalar(
            r#"
            UPDATE discussions
            SET is_deleted = TRUE, message = $2, updated_at = NOW()
            WHERE id = $1 AND is_deleted = FALSE
            RETURNING parent_id
            "#,
        )
        .bind(id.0)
        .bind(removal.tombstone())
        .fetch_optional(&mut *tx)
        .await
        .map_err(database_error)?;

        let Some(parent_id) = deleted else {
            return Ok(false);
        };

        if let Some(parent_id) = parent_id {
            sqlx::query(
                "UPDATE discussions SET reply_count = GREATEST(reply_count - 1, 0) WHERE id = $1",
            )
            .bind(parent_id)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;
        }

        tx.commit().await.map_err(database_error)?;
        Ok(true)
    }

    async fn list_for_breed(
        &self,
        breed_id: BreedId,
        page: DiscussionPage,
        viewer: Option<UserId>,
    ) -> Result<Vec<DiscussionView>, DiscussionError> {
        let viewer_id = viewer.map(|id| id.0);

        let rows: Vec<DiscussionRow> = sqlx::query_as(&format!(
            r#"
            SELECT {DISCUSSION_COLUMNS}, r.reaction_type AS user_reaction
            FROM discussions d
            JOIN users u ON d.user_id = u.id
            LEFT JOIN reactions r
                ON r.subject_type = 'discussion' AND r.subject_id = d.id AND r.user_id = $1
            WHERE d.breed_id = $2 AND d.parent_id IS NULL AND d.is_deleted = FALSE
            ORDER BY d.created_at DESC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(viewer_id)
        .bind(breed_id.0)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        let mut views = rows
            .into_iter()
            .map(|row| row.into_view(viewer))
            .collect::<Result<Vec<_>, _>>()?;
        if views.is_empty() {
            return Ok(views);
        }

        let parent_ids: Vec<i64> = views.iter().map(|v| v.discussion.id.0).collect();
        let reply_rows: Vec<DiscussionRow> = sqlx::query_as(&format!(
            r#"
            SELECT * FROM (
                SELECT {DISCUSSION_COLUMNS}, r.reaction_type AS user_reaction,
                       ROW_NUMBER() OVER (PARTITION BY d.parent_id ORDER BY d.created_at ASC) AS rn
                FROM discussions d
                JOIN users u ON d.user_id = u.id
                LEFT JOIN reactions r
                    ON r.subject_type = 'discussion' AND r.subject_id = d.id AND r.user_id = $1
                WHERE d.parent_id = ANY($2) AND d.is_deleted = FALSE
            ) replies
            WHERE rn <= $3
            ORDER BY created_at ASC
            "#
        ))
        .bind(viewer_id)
        .bind(&parent_ids)
        .bind(DiscussionPage::REPLY_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        let mut replies: HashMap<i64, Vec<DiscussionView>> = HashMap::new();
        for row in reply_rows {
            let Some(parent_id) = row.parent_id else {
                continue;
            };
            replies
                .entry(parent_id)
                .or_default()
                .push(row.into_view(viewer)?);
        }
        for view in &mut views {
            view.replies = replies.remove(&view.discussion.id.0).unwrap_or_default();
        }

        Ok(views)
    }

    async fn list_for_author(
        &self,
        author: UserId,
    ) -> Result<Vec<AuthoredDiscussion>, DiscussionError> {
        let rows: Vec<DiscussionRow> = sqlx::query_as(&format!(
            r#"
            SELECT {DISCUSSION_COLUMNS}, cb.name AS breed_name
            FROM discussions d
            JOIN users u ON d.user_id = u.id
            JOIN cat_breeds cb ON d.breed_id = cb.id
            WHERE d.user_id = $1 AND d.is_deleted = FALSE AND d.parent_id IS NULL
            ORDER BY d.created_at DESC
            "#
        ))
        .bind(author.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(rows
            .into_iter()
            .map(|mut row| {
                let breed_name = row.breed_name.take().unwrap_or_default();
                AuthoredDiscussion {
                    discussion: row.into_discussion(),
                    breed_name,
                }
            })
            .collect())
    }
}
