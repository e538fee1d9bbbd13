use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::breed::errors::BreedError;
use crate::domain::breed::errors::BreedNameError;
use crate::domain::breed::models::BreedName;
use crate::domain::breed::models::BreedProfile;
use crate::domain::breed::models::CreateBreedCommand;
use crate::domain::breed::ports::BreedServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::messages::BreedData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_breed(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(body): Json<CreateBreedRequest>,
) -> Result<ApiSuccess<BreedData>, ApiError> {
    let command = body
        .try_into_command()
        .map_err(BreedError::from)?;

    state
        .breed_service
        .create_breed(command, caller.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref breed| ApiSuccess::new(StatusCode::CREATED, breed.into()))
}

/// HTTP request body for creating a breed (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateBreedRequest {
    name: String,
    #[serde(default)]
    origin: String,
    #[serde(default)]
    history: String,
    #[serde(default)]
    appearance: String,
    #[serde(default)]
    temperament: String,
    #[serde(default)]
    care_instructions: String,
    #[serde(default)]
    image_url: String,
}

impl CreateBreedRequest {
    fn try_into_command(self) -> Result<CreateBreedCommand, BreedNameError> {
        Ok(CreateBreedCommand {
            name: BreedName::new(self.name)?,
            profile: BreedProfile {
                origin: self.origin,
                history: self.history,
                appearance: self.appearance,
                temperament: self.temperament,
                care_instructions: self.care_instructions,
                image_url: self.image_url,
            },
        })
    }
}
