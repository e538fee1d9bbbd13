use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::domain::session::models::RefreshToken;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::cookies::REFRESH_TOKEN_COOKIE;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::messages::SessionUserData;
use crate::inbound::http::middleware::ClientContext;
use crate::inbound::http::router::AppState;

/// Mint a new access token from the refresh cookie, or from the body when
/// the cookie is absent.
///
/// With rotation enabled the refresh cookie is replaced as well.
pub async fn refresh_session(
    State(state): State<AppState>,
    ClientContext(context): ClientContext,
    jar: CookieJar,
    body: Option<Json<RefreshRequest>>,
) -> Result<(CookieJar, ApiSuccess<SessionUserData>), ApiError> {
    let token = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
        .or_else(|| body.map(|Json(body)| body.refresh_token))
        .ok_or_else(|| ApiError::Unauthorized("Missing refresh token".to_string()))?;

    let session = state
        .session_service
        .refresh(RefreshToken::new(token), context)
        .await?;

    let mut jar = state
        .cookie_policy
        .set_access_token(jar, &session.access_token.token);
    if let Some(refresh_token) = &session.refresh_token {
        jar = state
            .cookie_policy
            .set_refresh_token(jar, &refresh_token.token);
    }

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            SessionUserData::new(&session.user, &session.roles),
        ),
    ))
}

#[derive(Clone, Deserialize)]
pub struct RefreshRequest {
    refresh_token: String,
}
