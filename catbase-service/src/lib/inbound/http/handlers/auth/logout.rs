use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;

use crate::domain::session::models::RefreshToken;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::cookies::REFRESH_TOKEN_COOKIE;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::messages::MessageData;
use crate::inbound::http::middleware::ClientContext;
use crate::inbound::http::router::AppState;

/// Always succeeds: revokes the refresh token when one is sent and clears
/// both cookies.
pub async fn logout(
    State(state): State<AppState>,
    ClientContext(context): ClientContext,
    jar: CookieJar,
) -> (CookieJar, ApiSuccess<MessageData>) {
    let token = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
        .map(RefreshToken::new);

    state.session_service.logout(token, context).await;

    (
        state.cookie_policy.clear(jar),
        ApiSuccess::new(StatusCode::OK, MessageData::new("Logged out successfully")),
    )
}
