use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::discussion::models::DiscussionId;
use crate::domain::discussion::ports::DiscussionServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::messages::MessageData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_discussion(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(discussion_id): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let discussion_id = DiscussionId::from_string(&discussion_id)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .discussion_service
        .delete_discussion(discussion_id, caller.user_id, &caller.roles)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageData::new("Discussion deleted")))
}
