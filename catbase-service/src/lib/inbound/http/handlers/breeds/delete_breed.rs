use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::breed::models::BreedId;
use crate::domain::breed::ports::BreedServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::messages::MessageData;
use crate::inbound::http::router::AppState;

pub async fn delete_breed(
    State(state): State<AppState>,
    Path(breed_id): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let breed_id =
        BreedId::from_string(&breed_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .breed_service
        .delete_breed(breed_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageData::new("Breed deleted")))
}
