use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::reaction::models::toggle;
use crate::domain::reaction::models::ReactionKind;
use crate::domain::reaction::models::ReactionSummary;
use crate::domain::reaction::models::Subject;
use crate::domain::user::models::UserId;
use crate::reaction::errors::ReactionError;
use crate::reaction::ports::ReactionRepository;
use crate::reaction::ports::ReactionServicePort;

/// Attempts before a toggle gives up with `Contended`.
pub const MAX_TOGGLE_ATTEMPTS: usize = 5;

pub struct ReactionService<RR>
where
    RR: ReactionRepository,
{
    repository: Arc<RR>,
}

impl<RR> ReactionService<RR>
where
    RR: ReactionRepository,
{
    pub fn new(repository: Arc<RR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<RR> ReactionServicePort for ReactionService<RR>
where
    RR: ReactionRepository,
{
    async fn toggle(
        &self,
        subject: Subject,
        user_id: UserId,
        requested: ReactionKind,
    ) -> Result<ReactionSummary, ReactionError> {
        if !self.repository.subject_exists(subject).await? {
            return Err(ReactionError::NotFound(subject.to_string()));
        }

        for attempt in 1..=MAX_TOGGLE_ATTEMPTS {
            let current = self.repository.current(subject, user_id).await?;
            let next = toggle(current, requested);

            if self
                .repository
                .compare_and_swap(subject, user_id, current, next)
                .await?
            {
                tracing::debug!(
                    subject = %subject,
                    user_id = %user_id,
                    from = ?current,
                    to = ?next,
                    "Reaction toggled"
                );
                return self.summary(subject, Some(user_id)).await;
            }

            tracing::debug!(
                subject = %subject,
                user_id = %user_id,
                attempt,
                "Reaction changed concurrently, retrying"
            );
        }

        tracing::warn!(subject = %subject, user_id = %user_id, "Reaction toggle contended");
        Err(ReactionError::Contended)
    }

    async fn summary(
        &self,
        subject: Subject,
        viewer: Option<UserId>,
    ) -> Result<ReactionSummary, ReactionError> {
        self.repository
            .summary(subject, viewer)
            .await?
            .ok_or(ReactionError::NotFound(subject.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use mockall::mock;

    use super::*;
    use crate::domain::breed::models::BreedId;

    mock! {
        pub TestReactionRepository {}

        #[async_trait]
        impl ReactionRepository for TestReactionRepository {
            async fn subject_exists(&self, subject: Subject) -> Result<bool, ReactionError>;
            async fn current(&self, subject: Subject, user_id: UserId) -> Result<Option<ReactionKind>, ReactionError>;
            async fn compare_and_swap(&self, subject: Subject, user_id: UserId, expected: Option<ReactionKind>, next: Option<ReactionKind>) -> Result<bool, ReactionError>;
            async fn summary(&self, subject: Subject, viewer: Option<UserId>) -> Result<Option<ReactionSummary>, ReactionError>;
        }
    }

    fn subject() -> Subject {
        Subject::breed(BreedId(1))
    }

    #[tokio::test]
    async fn test_toggle_like_from_none() {
        let mut repository = MockTestReactionRepository::new();
        repository.expect_subject_exists().returning(|_| Ok(true));
        repository.expect_current().returning(|_, _| Ok(None));
        repository
            .expect_compare_and_swap()
            .withf(|_, _, expected, next| expected.is_none() && *next == Some(ReactionKind::Like))
            .times(1)
            .returning(|_, _, _, _| Ok(true));
        repository.expect_summary().returning(|_, _| {
            Ok(Some(ReactionSummary {
                user_reaction: Some(ReactionKind::Like),
                like_count: 1,
                dislike_count: 0,
            }))
        });

        let service = ReactionService::new(Arc::new(repository));
        let summary = service
            .toggle(subject(), UserId(1), ReactionKind::Like)
            .await
            .unwrap();

        assert_eq!(summary.user_reaction, Some(ReactionKind::Like));
        assert_eq!(summary.like_count, 1);
    }

    #[tokio::test]
    async fn test_toggle_retries_after_lost_race() {
        let reads = Arc::new(AtomicUsize::new(0));
        let mut repository = MockTestReactionRepository::new();
        repository.expect_subject_exists().returning(|_| Ok(true));

        let counter = reads.clone();
        repository.expect_current().returning(move |_, _| {
            // Another device liked between our first read and write.
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(None)
            } else {
                Ok(Some(ReactionKind::Like))
            }
        });
        repository
            .expect_compare_and_swap()
            .returning(|_, _, expected, _| Ok(expected.is_some()));
        repository.expect_summary().returning(|_, _| {
            Ok(Some(ReactionSummary {
                user_reaction: None,
                like_count: 0,
                dislike_count: 0,
            }))
        });

        let service = ReactionService::new(Arc::new(repository));
        let summary = service
            .toggle(subject(), UserId(1), ReactionKind::Like)
            .await
            .unwrap();

        assert_eq!(summary.user_reaction, None);
        assert_eq!(reads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_toggle_gives_up_when_contended() {
        let mut repository = MockTestReactionRepository::new();
        repository.expect_subject_exists().returning(|_| Ok(true));
        repository.expect_current().returning(|_, _| Ok(None));
        repository
            .expect_compare_and_swap()
            .times(MAX_TOGGLE_ATTEMPTS)
            .returning(|_, _, _, _| Ok(false));
        repository.expect_summary().times(0);

        let service = ReactionService::new(Arc::new(repository));
        let result = service
            .toggle(subject(), UserId(1), ReactionKind::Dislike)
            .await;

        assert_eq!(result, Err(ReactionError::Contended));
    }

    #[tokio::test]
    async fn test_toggle_missing_subject() {
        let mut repository = MockTestReactionRepository::new();
        repository.expect_subject_exists().returning(|_| Ok(false));
        repository.expect_current().times(0);

        let service = ReactionService::new(Arc::new(repository));
        let result = service
            .toggle(subject(), UserId(1), ReactionKind::Like)
            .await;

        assert!(matches!(result, Err(ReactionError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_summary_for_anonymous_viewer() {
        let mut repository = MockTestReactionRepository::new();
        repository
            .expect_summary()
            .withf(|_, viewer| viewer.is_none())
            .returning(|_, _| {
                Ok(Some(ReactionSummary {
                    user_reaction: None,
                    like_count: 3,
                    dislike_count: 1,
                }))
            });

        let service = ReactionService::new(Arc::new(repository));
        let summary = service.summary(subject(), None).await.unwrap();
        assert_eq!(summary.like_count, 3);
    }
}
