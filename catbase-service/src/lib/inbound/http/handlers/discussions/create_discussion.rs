use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::breed::models::BreedId;
use crate::domain::discussion::errors::DiscussionError;
use crate::domain::discussion::models::CreateDiscussionCommand;
use crate::domain::discussion::models::DiscussionId;
use crate::domain::discussion::models::Message;
use crate::domain::discussion::ports::DiscussionServicePort;
use crate::domain::rating::models::Ratings;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::messages::DiscussionData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_discussion(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(body): Json<CreateDiscussionRequest>,
) -> Result<ApiSuccess<DiscussionData>, ApiError> {
    state
        .discussion_service
        .create_discussion(body.try_into_command()?, caller.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref view| ApiSuccess::new(StatusCode::CREATED, view.into()))
}

/// HTTP request body for posting a discussion or a reply (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateDiscussionRequest {
    breed_id: i64,
    #[serde(default)]
    parent_id: Option<i64>,
    message: String,
    #[serde(default)]
    ratings: Option<BTreeMap<String, i64>>,
    #[serde(default)]
    tags: Vec<String>,
}

impl CreateDiscussionRequest {
    fn try_into_command(self) -> Result<CreateDiscussionCommand, DiscussionError> {
        Ok(CreateDiscussionCommand {
            breed_id: BreedId(self.breed_id),
            parent_id: self.parent_id.map(DiscussionId),
            message: Message::new(self.message)?,
            ratings: self.ratings.map(Ratings::new).transpose()?,
            tags: self.tags,
        })
    }
}
