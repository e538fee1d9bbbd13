use async_trait::async_trait;

use crate::breed::errors::BreedError;
use crate::domain::breed::models::Breed;
use crate::domain::breed::models::BreedId;
use crate::domain::breed::models::BreedQuery;
use crate::domain::breed::models::BreedView;
use crate::domain::breed::models::CreateBreedCommand;
use crate::domain::breed::models::NewBreed;
use crate::domain::breed::models::UpdateBreedCommand;
use crate::domain::user::models::UserId;

/// Port for breed catalogue operations.
#[async_trait]
pub trait BreedServicePort: Send + Sync + 'static {
    /// Page through breeds ordered by name.
    ///
    /// # Arguments
    /// * `query` - Paging and optional name search
    /// * `viewer` - Caller whose own reaction is attached, if authenticated
    async fn list_breeds(
        &self,
        query: BreedQuery,
        viewer: Option<UserId>,
    ) -> Result<Vec<BreedView>, BreedError>;

    /// Fetch one breed and count the view.
    ///
    /// # Errors
    /// * `NotFound` - Breed does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_breed(&self, id: BreedId, viewer: Option<UserId>)
        -> Result<BreedView, BreedError>;

    async fn create_breed(
        &self,
        command: CreateBreedCommand,
        created_by: UserId,
    ) -> Result<Breed, BreedError>;

    /// Apply a partial update.
    ///
    /// # Errors
    /// * `NotFound` - Breed does not exist
    async fn update_breed(
        &self,
        id: BreedId,
        command: UpdateBreedCommand,
    ) -> Result<Breed, BreedError>;

    /// Remove the breed with its discussions and every reaction on either.
    ///
    /// # Errors
    /// * `NotFound` - Breed does not exist
    async fn delete_breed(&self, id: BreedId) -> Result<(), BreedError>;
}

#[async_trait]
pub trait BreedRepository: Send + Sync + 'static {
    async fn list(
        &self,
        query: &BreedQuery,
        viewer: Option<UserId>,
    ) -> Result<Vec<BreedView>, BreedError>;

    async fn find_by_id(
        &self,
        id: BreedId,
        viewer: Option<UserId>,
    ) -> Result<Option<BreedView>, BreedError>;

    async fn increment_views(&self, id: BreedId) -> Result<(), BreedError>;

    async fn create(&self, breed: NewBreed) -> Result<Breed, BreedError>;

    /// Persist name and profile; counters are left untouched.
    ///
    /// # Errors
    /// * `NotFound` - Breed does not exist
    async fn update(&self, breed: Breed) -> Result<Breed, BreedError>;

    /// # Errors
    /// * `NotFound` - Breed does not exist
    async fn delete(&self, id: BreedId) -> Result<(), BreedError>;
}
