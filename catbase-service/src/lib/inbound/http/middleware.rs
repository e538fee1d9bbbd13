use std::convert::Infallible;
use std::net::SocketAddr;

use auth::Authenticator;
use axum::async_trait;
use axum::extract::ConnectInfo;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;

use super::cookies::ACCESS_TOKEN_COOKIE;
use super::handlers::ApiError;
use crate::domain::audit::AuditContext;
use crate::domain::user::models::Roles;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Caller identity taken from a verified access token.
///
/// Roles are the snapshot embedded when the token was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
    pub roles: Roles,
}

/// Reject the request unless it carries a valid access token.
pub async fn authenticate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = access_token(&jar, req.headers())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization token".to_string()))?;

    let user = verify_access_token(&state.authenticator, &token)?;
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Attach the caller when a valid access token is present; never rejects.
pub async fn optional_authenticate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(token) = access_token(&jar, req.headers()) {
        match verify_access_token(&state.authenticator, &token) {
            Ok(user) => {
                req.extensions_mut().insert(user);
            }
            Err(_) => tracing::debug!("Ignoring invalid access token on public route"),
        }
    }

    next.run(req).await
}

/// Must run inside `authenticate`.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    let user = req
        .extensions()
        .get::<AuthenticatedUser>()
        .ok_or_else(|| ApiError::Unauthorized("Unauthorized".to_string()))?;

    if !user.roles.is_admin() {
        tracing::warn!(user_id = %user.user_id, "Admin route refused");
        return Err(ApiError::Forbidden("Insufficient role".to_string()));
    }

    Ok(next.run(req).await)
}

/// Cookie first, then `Authorization: Bearer`.
fn access_token(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    if let Some(cookie) = jar.get(ACCESS_TOKEN_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

fn verify_access_token(
    authenticator: &Authenticator,
    token: &str,
) -> Result<AuthenticatedUser, ApiError> {
    let claims = authenticator.verify_access(token).map_err(|e| {
        tracing::warn!(error = %e, "Access token rejected");
        ApiError::Unauthorized("Invalid or expired token".to_string())
    })?;

    let user_id = claims.user_id().map(UserId).ok_or_else(|| {
        tracing::error!("Access token subject is not a user id");
        ApiError::Unauthorized("Invalid or expired token".to_string())
    })?;

    Ok(AuthenticatedUser {
        user_id,
        username: claims.username,
        roles: Roles::new(claims.roles),
    })
}

/// Client address and user agent for audit records.
///
/// The first `X-Forwarded-For` hop wins over the socket address.
#[derive(Debug, Clone, Default)]
pub struct ClientContext(pub AuditContext);

#[async_trait]
impl<S> FromRequestParts<S> for ClientContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let ip_address = forwarded.or_else(|| {
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        });

        let user_agent = parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        Ok(ClientContext(AuditContext {
            ip_address,
            user_agent,
        }))
    }
}
