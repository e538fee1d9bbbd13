use async_trait::async_trait;

use crate::discussion::errors::DiscussionError;
use crate::domain::breed::models::BreedId;
use crate::domain::discussion::models::AuthoredDiscussion;
use crate::domain::discussion::models::CreateDiscussionCommand;
use crate::domain::discussion::models::Discussion;
use crate::domain::discussion::models::DiscussionId;
use crate::domain::discussion::models::DiscussionPage;
use crate::domain::discussion::models::DiscussionView;
use crate::domain::discussion::models::NewDiscussion;
use crate::domain::discussion::models::Removal;
use crate::domain::discussion::models::UpdateDiscussionCommand;
use crate::domain::user::models::Roles;
use crate::domain::user::models::UserId;

/// Port for discussion operations.
#[async_trait]
pub trait DiscussionServicePort: Send + Sync + 'static {
    /// Post a top-level discussion or a reply.
    ///
    /// # Errors
    /// * `NotFound` - Breed or parent discussion does not exist
    /// * `InvalidParent` - Parent belongs to another breed
    /// * `AggregationFailed` - Discussion stored but averages not rebuilt
    /// * `DatabaseError` - Database operation failed
    async fn create_discussion(
        &self,
        command: CreateDiscussionCommand,
        author: UserId,
    ) -> Result<DiscussionView, DiscussionError>;

    /// Replace message, ratings and tags of the caller's own discussion.
    ///
    /// # Errors
    /// * `NotFound` - Missing, deleted, or owned by someone else
    async fn update_discussion(
        &self,
        id: DiscussionId,
        author: UserId,
        command: UpdateDiscussionCommand,
    ) -> Result<DiscussionView, DiscussionError>;

    /// Soft delete. Authors may remove their own; moderators and admins any.
    ///
    /// # Errors
    /// * `NotFound` - Missing, already deleted, or not removable by the caller
    async fn delete_discussion(
        &self,
        id: DiscussionId,
        actor: UserId,
        roles: &Roles,
    ) -> Result<(), DiscussionError>;

    /// Newest top-level discussions of a breed, each with its replies.
    async fn list_for_breed(
        &self,
        breed_id: BreedId,
        page: DiscussionPage,
        viewer: Option<UserId>,
    ) -> Result<Vec<DiscussionView>, DiscussionError>;

    /// The caller's own non-deleted top-level discussions.
    async fn list_for_author(
        &self,
        author: UserId,
    ) -> Result<Vec<AuthoredDiscussion>, DiscussionError>;
}

#[async_trait]
pub trait DiscussionRepository: Send + Sync + 'static {
    /// Fetch regardless of deletion state.
    async fn find_by_id(&self, id: DiscussionId) -> Result<Option<Discussion>, DiscussionError>;

    /// Insert; a reply also bumps its parent's reply count.
    ///
    /// # Errors
    /// * `NotFound` - Breed does not exist
    async fn create(&self, discussion: NewDiscussion) -> Result<Discussion, DiscussionError>;

    /// Overwrite the editable fields of a live discussion owned by `author`.
    ///
    /// # Returns
    /// `None` if no such discussion matched.
    async fn update(
        &self,
        id: DiscussionId,
        author: UserId,
        command: UpdateDiscussionCommand,
    ) -> Result<Option<Discussion>, DiscussionError>;

    /// Flag as deleted and replace the message with the tombstone.
    ///
    /// # Returns
    /// `false` if the discussion was missing or already deleted.
    async fn soft_delete(&self, id: DiscussionId, removal: Removal)
        -> Result<bool, DiscussionError>;

    async fn list_for_breed(
        &self,
        breed_id: BreedId,
        page: DiscussionPage,
        viewer: Option<UserId>,
    ) -> Result<Vec<DiscussionView>, DiscussionError>;

    async fn list_for_author(
        &self,
        author: UserId,
    ) -> Result<Vec<AuthoredDiscussion>, DiscussionError>;
}
