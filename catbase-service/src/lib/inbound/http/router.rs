use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::AllowOrigin;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::cookies::CookiePolicy;
use super::handlers::auth::get_current_user;
use super::handlers::auth::login;
use super::handlers::auth::logout;
use super::handlers::auth::refresh_session;
use super::handlers::breeds::create_breed;
use super::handlers::breeds::delete_breed;
use super::handlers::breeds::get_breed;
use super::handlers::breeds::list_breeds;
use super::handlers::breeds::update_breed;
use super::handlers::discussions::create_discussion;
use super::handlers::discussions::delete_discussion;
use super::handlers::discussions::list_breed_discussions;
use super::handlers::discussions::list_my_discussions;
use super::handlers::discussions::update_discussion;
use super::handlers::health::health;
use super::handlers::reactions::get_breed_reactions;
use super::handlers::reactions::react_to_breed;
use super::handlers::reactions::react_to_discussion;
use super::handlers::users::register_user;
use super::middleware::authenticate;
use super::middleware::optional_authenticate;
use super::middleware::require_admin;
use crate::domain::breed::ports::BreedServicePort;
use crate::domain::discussion::ports::DiscussionServicePort;
use crate::domain::reaction::ports::ReactionServicePort;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::ports::UserServicePort;

/// Services and shared settings available to every handler.
///
/// Services are held behind their ports so the binary can wire PostgreSQL
/// adapters while integration tests wire in-memory ones.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub session_service: Arc<dyn SessionServicePort>,
    pub breed_service: Arc<dyn BreedServicePort>,
    pub discussion_service: Arc<dyn DiscussionServicePort>,
    pub reaction_service: Arc<dyn ReactionServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub cookie_policy: CookiePolicy,
}

pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    let public_routes = Router::new()
        .route("/api/health", get(health))
        .route("/api/users", post(register_user))
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh", post(refresh_session))
        .route("/api/auth/logout", post(logout));

    let browse_routes = Router::new()
        .route("/api/cats", get(list_breeds))
        .route("/api/cats/:breed_id", get(get_breed))
        .route("/api/cats/:breed_id/reactions", get(get_breed_reactions))
        .route(
            "/api/cats/:breed_id/discussions",
            get(list_breed_discussions),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            optional_authenticate,
        ));

    let protected_routes = Router::new()
        .route("/api/auth/me", get(get_current_user))
        .route("/api/cats/:breed_id/react", post(react_to_breed))
        .route("/api/discussions", post(create_discussion))
        .route("/api/discussions/me", get(list_my_discussions))
        .route(
            "/api/discussions/:discussion_id",
            put(update_discussion).delete(delete_discussion),
        )
        .route(
            "/api/discussions/:discussion_id/react",
            post(react_to_discussion),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    // Layers run bottom-up: authenticate, then the role check.
    let admin_routes = Router::new()
        .route("/api/admin/cats", post(create_breed))
        .route(
            "/api/admin/cats/:breed_id",
            put(update_breed).delete(delete_breed),
        )
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(browse_routes)
        .merge(protected_routes)
        .merge(admin_routes)
        .layer(trace_layer)
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

/// Credentialed CORS for the configured front-end origins only.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Skipping invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
