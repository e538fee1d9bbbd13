use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::discussion::ports::DiscussionServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::messages::AuthoredDiscussionData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_my_discussions(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<Vec<AuthoredDiscussionData>>, ApiError> {
    state
        .discussion_service
        .list_for_author(caller.user_id)
        .await
        .map_err(ApiError::from)
        .map(|discussions| {
            let discussion_data: Vec<AuthoredDiscussionData> =
                discussions.iter().map(|d| d.into()).collect();
            ApiSuccess::new(StatusCode::OK, discussion_data)
        })
}
