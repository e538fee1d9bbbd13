use std::sync::Arc;

use async_trait::async_trait;

use crate::breed::errors::BreedError;
use crate::breed::ports::BreedRepository;
use crate::breed::ports::BreedServicePort;
use crate::domain::breed::models::Breed;
use crate::domain::breed::models::BreedId;
use crate::domain::breed::models::BreedQuery;
use crate::domain::breed::models::BreedView;
use crate::domain::breed::models::CreateBreedCommand;
use crate::domain::breed::models::NewBreed;
use crate::domain::breed::models::UpdateBreedCommand;
use crate::domain::user::models::UserId;

pub struct BreedService<BR>
where
    BR: BreedRepository,
{
    repository: Arc<BR>,
}

impl<BR> BreedService<BR>
where
    BR: BreedRepository,
{
    pub fn new(repository: Arc<BR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<BR> BreedServicePort for BreedService<BR>
where
    BR: BreedRepository,
{
    async fn list_breeds(
        &self,
        query: BreedQuery,
        viewer: Option<UserId>,
    ) -> Result<Vec<BreedView>, BreedError> {
        self.repository.list(&query, viewer).await
    }

    async fn get_breed(
        &self,
        id: BreedId,
        viewer: Option<UserId>,
    ) -> Result<BreedView, BreedError> {
        let view = self
            .repository
            .find_by_id(id, viewer)
            .await?
            .ok_or(BreedError::NotFound(id.to_string()))?;

        if let Err(e) = self.repository.increment_views(id).await {
            tracing::warn!(breed_id = %id, error = %e, "Failed to count breed view");
        }

        Ok(view)
    }

    async fn create_breed(
        &self,
        command: CreateBreedCommand,
        created_by: UserId,
    ) -> Result<Breed, BreedError> {
        let breed = self
            .repository
            .create(NewBreed {
                name: command.name,
                profile: command.profile,
                created_by,
            })
            .await?;

        tracing::info!(breed_id = %breed.id, created_by = %created_by, "Breed created");
        Ok(breed)
    }

    async fn update_breed(
        &self,
        id: BreedId,
        command: UpdateBreedCommand,
    ) -> Result<Breed, BreedError> {
        let mut breed = self
            .repository
            .find_by_id(id, None)
            .await?
            .ok_or(BreedError::NotFound(id.to_string()))?
            .breed;

        command.apply(&mut breed);
        self.repository.update(breed).await
    }

    async fn delete_breed(&self, id: BreedId) -> Result<(), BreedError> {
        self.repository.delete(id).await?;
        tracing::info!(breed_id = %id, "Breed deleted");
        Ok(())
    }
}
