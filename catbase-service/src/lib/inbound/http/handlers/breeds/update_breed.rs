use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::domain::breed::errors::BreedError;
use crate::domain::breed::errors::BreedNameError;
use crate::domain::breed::models::BreedId;
use crate::domain::breed::models::BreedName;
use crate::domain::breed::models::UpdateBreedCommand;
use crate::domain::breed::ports::BreedServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::messages::BreedData;
use crate::inbound::http::router::AppState;

pub async fn update_breed(
    State(state): State<AppState>,
    Path(breed_id): Path<String>,
    Json(body): Json<UpdateBreedRequest>,
) -> Result<ApiSuccess<BreedData>, ApiError> {
    let breed_id =
        BreedId::from_string(&breed_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let command = body
        .try_into_command()
        .map_err(BreedError::from)?;

    state
        .breed_service
        .update_breed(breed_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref breed| ApiSuccess::new(StatusCode::OK, breed.into()))
}

/// Partial update body. Missing or blank fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateBreedRequest {
    name: Option<String>,
    origin: Option<String>,
    history: Option<String>,
    appearance: Option<String>,
    temperament: Option<String>,
    care_instructions: Option<String>,
    image_url: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl UpdateBreedRequest {
    fn try_into_command(self) -> Result<UpdateBreedCommand, BreedNameError> {
        Ok(UpdateBreedCommand {
            name: present(self.name).map(BreedName::new).transpose()?,
            origin: present(self.origin),
            history: present(self.history),
            appearance: present(self.appearance),
            temperament: present(self.temperament),
            care_instructions: present(self.care_instructions),
            image_url: present(self.image_url),
        })
    }
}
