use std::net::SocketAddr;
use std::sync::Arc;

use auth::Authenticator;
use catbase_service::config::Config;
use catbase_service::domain::breed::service::BreedService;
use catbase_service::domain::discussion::service::DiscussionService;
use catbase_service::domain::rating::service::RatingService;
use catbase_service::domain::reaction::service::ReactionService;
use catbase_service::domain::session::models::SessionPolicy;
use catbase_service::domain::session::service::SessionService;
use catbase_service::domain::user::service::UserService;
use catbase_service::inbound::http::cookies::CookiePolicy;
use catbase_service::inbound::http::router::create_router;
use catbase_service::inbound::http::router::AppState;
use catbase_service::outbound::repositories::PostgresAuditLog;
use catbase_service::outbound::repositories::PostgresBreedRepository;
use catbase_service::outbound::repositories::PostgresDiscussionRepository;
use catbase_service::outbound::repositories::PostgresRatingRepository;
use catbase_service::outbound::repositories::PostgresReactionRepository;
use catbase_service::outbound::repositories::PostgresRefreshTokenLedger;
use catbase_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catbase_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "catbase-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    config.validate()?;

    tracing::info!(
        http_port = config.server.http_port,
        max_connections = config.database.max_connections,
        rotate_refresh_tokens = config.session.rotate_refresh_tokens,
        secure_cookies = config.cookies.secure,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .idle_timeout(config.database.idle_timeout())
        .max_lifetime(config.database.max_lifetime())
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        min_connections = config.database.min_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let token_policy = config.jwt.token_policy();
    let cookie_policy = CookiePolicy::new(
        config.cookies.secure,
        config.cookies.domain.clone(),
        &token_policy,
    );
    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        token_policy,
    ));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let audit_log = Arc::new(PostgresAuditLog::new(pg_pool.clone()));
    let ledger = Arc::new(PostgresRefreshTokenLedger::new(pg_pool.clone()));
    let breed_repository = Arc::new(PostgresBreedRepository::new(pg_pool.clone()));
    let discussion_repository = Arc::new(PostgresDiscussionRepository::new(pg_pool.clone()));
    let rating_repository = Arc::new(PostgresRatingRepository::new(pg_pool.clone()));
    let reaction_repository = Arc::new(PostgresReactionRepository::new(pg_pool));

    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repository),
        Arc::clone(&audit_log),
        Arc::clone(&authenticator),
    ));
    let session_service = Arc::new(SessionService::new(
        user_repository,
        ledger,
        audit_log,
        Arc::clone(&authenticator),
        SessionPolicy {
            rotate_refresh_tokens: config.session.rotate_refresh_tokens,
        },
    ));
    let rating_service = Arc::new(RatingService::new(rating_repository));
    let breed_service = Arc::new(BreedService::new(breed_repository));
    let discussion_service = Arc::new(DiscussionService::new(
        discussion_repository,
        rating_service,
    ));
    let reaction_service = Arc::new(ReactionService::new(reaction_repository));

    let state = AppState {
        user_service,
        session_service,
        breed_service,
        discussion_service,
        reaction_service,
        authenticator,
        cookie_policy,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(state, &config.cors.allowed_origins);
    axum::serve(
        http_listener,
        http_application.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    tracing::info!("Server exited");
    Ok(())
}
