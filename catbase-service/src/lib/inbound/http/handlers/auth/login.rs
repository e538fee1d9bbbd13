use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::domain::session::models::LoginCommand;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::messages::SessionUserData;
use crate::inbound::http::middleware::ClientContext;
use crate::inbound::http::router::AppState;

/// Exchange credentials for an access/refresh cookie pair.
pub async fn login(
    State(state): State<AppState>,
    ClientContext(context): ClientContext,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, ApiSuccess<SessionUserData>), ApiError> {
    let session = state
        .session_service
        .login(body.into_command(), context)
        .await?;

    let jar = state
        .cookie_policy
        .set_access_token(jar, &session.access_token.token);
    let jar = state
        .cookie_policy
        .set_refresh_token(jar, &session.refresh_token.token);

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            SessionUserData::new(&session.user, &session.roles),
        ),
    ))
}

/// HTTP request body for logging in (raw JSON)
#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

impl LoginRequest {
    fn into_command(self) -> LoginCommand {
        LoginCommand {
            username: self.username,
            password: self.password,
        }
    }
}
