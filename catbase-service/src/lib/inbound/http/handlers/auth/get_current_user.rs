use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::messages::SessionUserData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// The caller's profile with roles read from storage, not from the token.
pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<SessionUserData>, ApiError> {
    state
        .user_service
        .get_profile(&caller.user_id)
        .await
        .map_err(ApiError::from)
        .map(|profile| {
            ApiSuccess::new(
                StatusCode::OK,
                SessionUserData::new(&profile.user, &profile.roles),
            )
        })
}
