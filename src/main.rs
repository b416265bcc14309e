//! Librarium Server - Library Catalog REST API

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use librarium_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::Services,
    sorting::PropertyMappingService,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "librarium_server={},tower_http=debug",
            config.logging.level
        )
        .into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Librarium Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Property mapping registration is validated here, not per request
    let mappings = PropertyMappingService::new().expect("Invalid property mapping configuration");

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, mappings);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let addr = SocketAddr::new(
        state.config.server.host.parse().expect("Invalid host address"),
        state.config.server.port,
    );

    // Build router
    let app = create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    // Connect info is required by the per-IP rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Per-IP rate limiting; the config must outlive the router
    let governor_conf = Box::new(
        GovernorConfigBuilder::default()
            .per_second(state.config.rate_limit.per_second)
            .burst_size(state.config.rate_limit.burst_size)
            .finish()
            .expect("Invalid rate limit configuration"),
    );

    // API routes
    let api = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authors
        .route("/authors", get(api::authors::list_authors))
        .route("/authors", post(api::authors::create_author))
        .route("/authors/:id", get(api::authors::get_author))
        .route("/authors/:id", post(api::authors::block_author_creation))
        .route("/authors/:id", delete(api::authors::delete_author))
        // Author collections
        .route(
            "/authorcollections",
            post(api::author_collections::create_author_collection),
        )
        .route(
            "/authorcollections/:ids",
            get(api::author_collections::get_author_collection),
        )
        // Books
        .route(
            "/authors/:author_id/books",
            get(api::books::list_books_for_author),
        )
        .route(
            "/authors/:author_id/books",
            post(api::books::create_book_for_author),
        )
        .route(
            "/authors/:author_id/books/:id",
            get(api::books::get_book_for_author),
        )
        .route(
            "/authors/:author_id/books/:id",
            put(api::books::update_book_for_author),
        )
        .route(
            "/authors/:author_id/books/:id",
            patch(api::books::patch_book_for_author),
        )
        .route(
            "/authors/:author_id/books/:id",
            delete(api::books::delete_book_for_author),
        )
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api", api)
        .merge(openapi)
        .layer(GovernorLayer {
            config: Box::leak(governor_conf),
        })
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
