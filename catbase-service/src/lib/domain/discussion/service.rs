use std::sync::Arc;

use async_trait::async_trait;

use crate::discussion::errors::DiscussionError;
use crate::discussion::ports::DiscussionRepository;
use crate::discussion::ports::DiscussionServicePort;
use crate::domain::breed::models::BreedId;
use crate::domain::discussion::models::non_empty_ratings;
use crate::domain::discussion::models::normalize_tags;
use crate::domain::discussion::models::AuthoredDiscussion;
use crate::domain::discussion::models::CreateDiscussionCommand;
use crate::domain::discussion::models::DiscussionId;
use crate::domain::discussion::models::DiscussionPage;
use crate::domain::discussion::models::DiscussionView;
use crate::domain::discussion::models::NewDiscussion;
use crate::domain::discussion::models::Removal;
use crate::domain::discussion::models::UpdateDiscussionCommand;
use crate::domain::user::models::Roles;
use crate::domain::user::models::UserId;
use crate::rating::ports::RatingServicePort;

/// Discussion writes, keeping the breed's rating aggregate in step.
///
/// Aggregation runs after the discussion write has committed; if it fails the
/// request fails too, and retrying is safe because aggregation recomputes
/// from scratch.
pub struct DiscussionService<DR, RS>
where
    DR: DiscussionRepository,
    RS: RatingServicePort,
{
    repository: Arc<DR>,
    ratings: Arc<RS>,
}

impl<DR, RS> DiscussionService<DR, RS>
where
    DR: DiscussionRepository,
    RS: RatingServicePort,
{
    pub fn new(repository: Arc<DR>, ratings: Arc<RS>) -> Self {
        Self {
            repository,
            ratings,
        }
    }

    async fn recompute_ratings(&self, breed_id: BreedId) -> Result<(), DiscussionError> {
        self.ratings.recompute(breed_id).await.map_err(|e| {
            tracing::error!(breed_id = %breed_id, error = %e, "Rating aggregation failed");
            DiscussionError::AggregationFailed(e.to_string())
        })?;
        Ok(())
    }
}

#[async_trait]
impl<DR, RS> DiscussionServicePort for DiscussionService<DR, RS>
where
    DR: DiscussionRepository,
    RS: RatingServicePort,
{
    async fn create_discussion(
        &self,
        command: CreateDiscussionCommand,
        author: UserId,
    ) -> Result<DiscussionView, DiscussionError> {
        if let Some(parent_id) = command.parent_id {
            let parent = self
                .repository
                .find_by_id(parent_id)
                .await?
                .filter(|parent| !parent.is_deleted)
                .ok_or_else(|| {
                    DiscussionError::NotFound(format!("parent discussion {}", parent_id))
                })?;
            if parent.breed_id != command.breed_id {
                return Err(DiscussionError::InvalidParent(
                    "parent discussion belongs to a different breed".to_string(),
                ));
            }
        }

        let ratings = match command.parent_id {
            Some(_) => None,
            None => non_empty_ratings(command.ratings),
        };

        let created = self
            .repository
            .create(NewDiscussion {
                breed_id: command.breed_id,
                user_id: author,
                parent_id: command.parent_id,
                message: command.message,
                ratings,
                tags: normalize_tags(command.tags),
            })
            .await?;

        tracing::info!(
            discussion_id = %created.id,
            breed_id = %created.breed_id,
            user_id = %author,
            reply = !created.is_top_level(),
            "Discussion created"
        );

        if created.is_top_level() && created.ratings.is_some() {
            self.recompute_ratings(created.breed_id).await?;
        }

        Ok(DiscussionView::owned(created))
    }

    async fn update_discussion(
        &self,
        id: DiscussionId,
        author: UserId,
        command: UpdateDiscussionCommand,
    ) -> Result<DiscussionView, DiscussionError> {
        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .filter(|d| !d.is_deleted && d.user_id == author)
            .ok_or(DiscussionError::NotFound(id.to_string()))?;

        let command = UpdateDiscussionCommand {
            message: command.message,
            ratings: if existing.is_top_level() {
                non_empty_ratings(command.ratings)
            } else {
                None
            },
            tags: normalize_tags(command.tags),
        };

        let updated = self
            .repository
            .update(id, author, command)
            .await?
            .ok_or(DiscussionError::NotFound(id.to_string()))?;

        if updated.is_top_level() && (existing.ratings.is_some() || updated.ratings.is_some()) {
            self.recompute_ratings(updated.breed_id).await?;
        }

        Ok(DiscussionView::owned(updated))
    }

    async fn delete_discussion(
        &self,
        id: DiscussionId,
        actor: UserId,
        roles: &Roles,
    ) -> Result<(), DiscussionError> {
        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .filter(|d| !d.is_deleted)
            .ok_or(DiscussionError::NotFound(id.to_string()))?;

        let removal = if existing.user_id == actor {
            Removal::ByAuthor
        } else if roles.can_moderate() {
            Removal::ByModerator
        } else {
            return Err(DiscussionError::NotFound(id.to_string()));
        };

        if !self.repository.soft_delete(id, removal).await? {
            return Err(DiscussionError::NotFound(id.to_string()));
        }

        tracing::info!(
            discussion_id = %id,
            actor = %actor,
            removal = ?removal,
            "Discussion deleted"
        );

        if existing.is_top_level() {
            self.recompute_ratings(existing.breed_id).await?;
        }

        Ok(())
    }

    async fn list_for_breed(
        &self,
        breed_id: BreedId,
        page: DiscussionPage,
        viewer: Option<UserId>,
    ) -> Result<Vec<DiscussionView>, DiscussionError> {
        self.repository.list_for_breed(breed_id, page, viewer).await
    }

    async fn list_for_author(
        &self,
        author: UserId,
    ) -> Result<Vec<AuthoredDiscussion>, DiscussionError> {
        self.repository.list_for_author(author).await
    }
}
