use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::Transaction;

use crate::domain::reaction::models::ReactionKind;
use crate::domain::reaction::models::ReactionSummary;
use crate::domain::reaction::models::Subject;
use crate::domain::reaction::models::SubjectKind;
use crate::domain::reaction::ports::ReactionRepository;
use crate::domain::user::models::UserId;
use crate::reaction::errors::ReactionError;

/// Reactions for breeds and discussions share one table keyed by
/// `(subject_type, subject_id, user_id)`.
pub struct PostgresReactionRepository {
    pool: PgPool,
}

impl PostgresReactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn database_error(e: sqlx::Error) -> ReactionError {
    ReactionError::DatabaseError(e.to_string())
}

fn parse_kind(raw: Option<String>) -> Result<Option<ReactionKind>, ReactionError> {
    raw.map(|kind| kind.parse::<ReactionKind>()).transpose()
}

/// Table holding the subject's denormalised totals.
fn subject_table(kind: SubjectKind) -> &'static str {
    match kind {
        SubjectKind::Breed => "cat_breeds",
        SubjectKind::Discussion => "discussions",
    }
}

/// Serialise writers on one subject so the recount below sees every
/// committed reaction.
async fn lock_subject(
    tx: &mut Transaction<'_, Postgres>,
    subject: Subject,
) -> Result<(), ReactionError> {
    let locked: Option<i64> = sqlx::query_scalar(&format!(
        "SELECT id FROM {table} WHERE id = $1 FOR UPDATE",
        table = subject_table(subject.kind)
    ))
    .bind(subject.id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(database_error)?;

    match locked {
        Some(_) => Ok(()),
        None => Err(ReactionError::NotFound(subject.to_string())),
    }
}

/// Must run after `lock_subject` in the same transaction.
async fn refresh_totals(
    tx: &mut Transaction<'_, Postgres>,
    subject: Subject,
) -> Result<(), ReactionError> {
    sqlx::query(&format!(
        r#"
        UPDATE {table}
        SET like_count = (
                SELECT COUNT(*) FROM reactions
                WHERE subject_type = $1 AND subject_id = $2 AND reaction_type = 'like'),
            dislike_count = (
                SELECT COUNT(*) FROM reactions
                WHERE subject_type = $1 AND subject_id = $2 AND reaction_type = 'dislike')
        WHERE id = $2
        "#,
        table = subject_table(subject.kind)
    ))
    .bind(subject.kind.as_str())
    .bind(subject.id)
    .execute(&mut **tx)
    .await
    .map_err(database_error)?;

    Ok(())
}

#[async_trait]
impl ReactionRepository for PostgresReactionRepository {
    async fn subject_exists(&self, subject: Subject) -> Result<bool, ReactionError> {
        let sql = match subject.kind {
            SubjectKind::Breed => "SELECT EXISTS (SELECT 1 FROM cat_breeds WHERE id = $1)",
            SubjectKind::Discussion => {
                "SELECT EXISTS (SELECT 1 FROM discussions WHERE id = $1 AND is_deleted = FALSE)"
            }
        };

        sqlx::query_scalar(sql)
            .bind(subject.id)
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)
    }

    async fn current(
        &self,
        subject: Subject,
        user_id: UserId,
    ) -> Result<Option<ReactionKind>, ReactionError> {
        let raw: Option<String> = sqlx::query_scalar(
            r#"
            SELECT reaction_type FROM reactions
            WHERE subject_type = $1 AND subject_id = $2 AND user_id = $3
            "#,
        )
        .bind(subject.kind.as_str())
        .bind(subject.id)
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        parse_kind(raw)
    }

    async fn compare_and_swap(
        &self,
        subject: Subject,
        user_id: UserId,
        expected: Option<ReactionKind>,
        next: Option<ReactionKind>,
    ) -> Result<bool, ReactionError> {
        if expected == next {
            return Ok(true);
        }

        let mut tx = self.pool.begin().await.map_err(database_error)?;
        lock_subject(&mut tx, subject).await?;

        // Each statement only matches while the stored value still equals
        // `expected`, so a concurrent writer makes it affect zero rows.
        let result = match (expected, next) {
            (None, Some(kind)) => {
                sqlx::query(
                    r#"
                    INSERT INTO reactions (subject_type, subject_id, user_id, reaction_type)
                    VALUES ($1, $2, $3, $4)
                    ON CONFLICT ON CONSTRAINT reactions_subject_user_key DO NOTHING
                    "#,
                )
                .bind(subject.kind.as_str())
                .bind(subject.id)
                .bind(user_id.0)
                .bind(kind.as_str())
                .execute(&mut *tx)
                .await
            }
            (Some(current), None) => {
                sqlx::query(
                    r#"
                    DELETE FROM reactions
                    WHERE subject_type = $1 AND subject_id = $2 AND user_id = $3
                      AND reaction_type = $4
                    "#,
                )
                .bind(subject.kind.as_str())
                .bind(subject.id)
                .bind(user_id.0)
                .bind(current.as_str())
                .execute(&mut *tx)
                .await
            }
            (Some(current), Some(kind)) => {
                sqlx::query(
                    r#"
                    UPDATE reactions
                    SET reaction_type = $5, updated_at = NOW()
                    WHERE subject_type = $1 AND subject_id = $2 AND user_id = $3
                      AND reaction_type = $4
                    "#,
                )
                .bind(subject.kind.as_str())
                .bind(subject.id)
                .bind(user_id.0)
                .bind(current.as_str())
                .bind(kind.as_str())
                .execute(&mut *tx)
                .await
            }
            (None, None) => return Ok(true),
        }
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        refresh_totals(&mut tx, subject).await?;
        tx.commit().await.map_err(database_error)?;
        Ok(true)
    }

    async fn summary(
        &self,
        subject: Subject,
        viewer: Option<UserId>,
    ) -> Result<Option<ReactionSummary>, ReactionError> {
        let row: Option<(i64, i64, Option<String>)> = sqlx::query_as(&format!(
            r#"
            SELECT s.like_count, s.dislike_count, r.reaction_type
            FROM {table} s
            LEFT JOIN reactions r
                ON r.subject_type = $1 AND r.subject_id = s.id AND r.user_id = $3
            WHERE s.id = $2
            "#,
            table = subject_table(subject.kind)
        ))
        .bind(subject.kind.as_str())
        .bind(subject.id)
        .bind(viewer.map(|id| id.0))
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        match row {
            Some((like_count, dislike_count, reaction)) => Ok(Some(ReactionSummary {
                user_reaction: parse_kind(reaction)?,
                like_count,
                dislike_count,
            })),
            None => Ok(None),
        }
    }
}
