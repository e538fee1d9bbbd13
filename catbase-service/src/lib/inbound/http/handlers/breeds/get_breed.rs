use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::breed::models::BreedId;
use crate::domain::breed::ports::BreedServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::messages::BreedData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_breed(
    State(state): State<AppState>,
    caller: Option<Extension<AuthenticatedUser>>,
    Path(breed_id): Path<String>,
) -> Result<ApiSuccess<BreedData>, ApiError> {
    let breed_id =
        BreedId::from_string(&breed_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let viewer = caller.map(|Extension(caller)| caller.user_id);

    state
        .breed_service
        .get_breed(breed_id, viewer)
        .await
        .map_err(ApiError::from)
        .map(|ref view| ApiSuccess::new(StatusCode::OK, view.into()))
}
