use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::breed::models::BreedId;
use crate::domain::discussion::models::DiscussionId;
use crate::domain::reaction::errors::ReactionError;
use crate::domain::reaction::models::ReactionKind;
use crate::domain::reaction::models::ReactionSummary;
use crate::domain::reaction::models::Subject;
use crate::domain::reaction::ports::ReactionServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn react_to_breed(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(breed_id): Path<String>,
    Json(body): Json<ToggleReactionRequest>,
) -> Result<ApiSuccess<ReactionSummary>, ApiError> {
    let breed_id =
        BreedId::from_string(&breed_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    toggle(&state, Subject::breed(breed_id), &caller, body).await
}

pub async fn react_to_discussion(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(discussion_id): Path<String>,
    Json(body): Json<ToggleReactionRequest>,
) -> Result<ApiSuccess<ReactionSummary>, ApiError> {
    let discussion_id = DiscussionId::from_string(&discussion_id)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    toggle(&state, Subject::discussion(discussion_id), &caller, body).await
}

async fn toggle(
    state: &AppState,
    subject: Subject,
    caller: &AuthenticatedUser,
    body: ToggleReactionRequest,
) -> Result<ApiSuccess<ReactionSummary>, ApiError> {
    let requested = body.try_into_kind()?;

    state
        .reaction_service
        .toggle(subject, caller.user_id, requested)
        .await
        .map_err(ApiError::from)
        .map(|summary| ApiSuccess::new(StatusCode::OK, summary))
}

/// HTTP request body for a reaction toggle (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToggleReactionRequest {
    reaction_type: String,
}

impl ToggleReactionRequest {
    fn try_into_kind(self) -> Result<ReactionKind, ReactionError> {
        self.reaction_type.parse()
    }
}
