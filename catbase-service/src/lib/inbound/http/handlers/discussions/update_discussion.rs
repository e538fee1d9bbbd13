use std::collections::BTreeMap;

use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::discussion::errors::DiscussionError;
use crate::domain::discussion::models::DiscussionId;
use crate::domain::discussion::models::Message;
use crate::domain::discussion::models::UpdateDiscussionCommand;
use crate::domain::discussion::ports::DiscussionServicePort;
use crate::domain::rating::models::Ratings;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::messages::DiscussionData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Owner-only edit. Someone else's discussion reads as not found.
pub async fn update_discussion(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(discussion_id): Path<String>,
    Json(body): Json<UpdateDiscussionRequest>,
) -> Result<ApiSuccess<DiscussionData>, ApiError> {
    let discussion_id = DiscussionId::from_string(&discussion_id)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .discussion_service
        .update_discussion(discussion_id, caller.user_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref view| ApiSuccess::new(StatusCode::OK, view.into()))
}

/// HTTP request body for editing a discussion (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateDiscussionRequest {
    message: String,
    #[serde(default)]
    ratings: Option<BTreeMap<String, i64>>,
    #[serde(default)]
    tags: Vec<String>,
}

impl UpdateDiscussionRequest {
    fn try_into_command(self) -> Result<UpdateDiscussionCommand, DiscussionError> {
        Ok(UpdateDiscussionCommand {
            message: Message::new(self.message)?,
            ratings: self.ratings.map(Ratings::new).transpose()?,
            tags: self.tags,
        })
    }
}
