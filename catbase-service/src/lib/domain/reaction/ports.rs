use async_trait::async_trait;

use crate::domain::reaction::models::ReactionKind;
use crate::domain::reaction::models::ReactionSummary;
use crate::domain::reaction::models::Subject;
use crate::domain::user::models::UserId;
use crate::reaction::errors::ReactionError;

/// Port for the reaction toggle engine.
#[async_trait]
pub trait ReactionServicePort: Send + Sync + 'static {
    /// Apply one toggle request and return the re-read totals.
    ///
    /// # Errors
    /// * `NotFound` - Subject does not exist or is deleted
    /// * `Contended` - Lost the compare-and-swap on every attempt
    /// * `DatabaseError` - Database operation failed
    async fn toggle(
        &self,
        subject: Subject,
        user_id: UserId,
        requested: ReactionKind,
    ) -> Result<ReactionSummary, ReactionError>;

    /// Current totals, with the viewer's own reaction when known.
    ///
    /// # Errors
    /// * `NotFound` - Subject does not exist or is deleted
    async fn summary(
        &self,
        subject: Subject,
        viewer: Option<UserId>,
    ) -> Result<ReactionSummary, ReactionError>;
}

#[async_trait]
pub trait ReactionRepository: Send + Sync + 'static {
    /// Whether the subject exists and accepts reactions.
    async fn subject_exists(&self, subject: Subject) -> Result<bool, ReactionError>;

    async fn current(
        &self,
        subject: Subject,
        user_id: UserId,
    ) -> Result<Option<ReactionKind>, ReactionError>;

    /// Move the stored reaction from `expected` to `next` only if it still
    /// equals `expected`, refreshing the subject's denormalised totals in the
    /// same transaction.
    ///
    /// # Returns
    /// `false` without changes when the stored value no longer matched.
    async fn compare_and_swap(
        &self,
        subject: Subject,
        user_id: UserId,
        expected: Option<ReactionKind>,
        next: Option<ReactionKind>,
    ) -> Result<bool, ReactionError>;

    /// `None` when the subject does not exist.
    async fn summary(
        &self,
        subject: Subject,
        viewer: Option<UserId>,
    ) -> Result<Option<ReactionSummary>, ReactionError>;
}
