use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::breed::models::BreedId;
use crate::domain::reaction::models::ReactionSummary;
use crate::domain::reaction::models::Subject;
use crate::domain::reaction::ports::ReactionServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_breed_reactions(
    State(state): State<AppState>,
    caller: Option<Extension<AuthenticatedUser>>,
    Path(breed_id): Path<String>,
) -> Result<ApiSuccess<ReactionSummary>, ApiError> {
    let breed_id =
        BreedId::from_string(&breed_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let viewer = caller.map(|Extension(caller)| caller.user_id);

    state
        .reaction_service
        .summary(Subject::breed(breed_id), viewer)
        .await
        .map_err(ApiError::from)
        .map(|summary| ApiSuccess::new(StatusCode::OK, summary))
}
