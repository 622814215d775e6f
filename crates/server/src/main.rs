//! Blogr server entry point.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, middleware, Router};
use blogr_api::{middleware::AppState, router as api_router};
use blogr_common::{Config, LocalStorage, StorageBackend};
use blogr_core::{
    CategoryService, CommentService, LocationService, MediaService, PostService, UserService,
};
use blogr_db::repositories::{
    CategoryRepository, CommentRepository, LocationRepository, PostRepository,
    UserProfileRepository, UserRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blogr=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting blogr server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database and run migrations
    let db = blogr_db::init(&config).await?;
    info!("Connected to database");

    info!("Running database migrations...");
    blogr_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let user_profile_repo = UserProfileRepository::new(Arc::clone(&db));
    let post_repo = PostRepository::new(Arc::clone(&db));
    let comment_repo = CommentRepository::new(Arc::clone(&db));
    let category_repo = CategoryRepository::new(Arc::clone(&db));
    let location_repo = LocationRepository::new(Arc::clone(&db));

    // Initialize local media storage
    let storage: Arc<dyn StorageBackend> = Arc::new(LocalStorage::new(
        PathBuf::from(&config.storage.media_path),
        config.storage.media_url.clone(),
    ));

    // Initialize services
    let user_service = UserService::new(user_repo.clone(), user_profile_repo);
    let post_service = PostService::new(
        post_repo.clone(),
        user_repo,
        category_repo.clone(),
        location_repo.clone(),
    );
    let comment_service = CommentService::new(comment_repo, post_repo, category_repo.clone());
    let category_service = CategoryService::new(category_repo);
    let location_service = LocationService::new(location_repo);
    let media_service = MediaService::new(storage, config.storage.max_upload_size as u64);

    let state = AppState {
        user_service,
        post_service,
        comment_service,
        category_service,
        location_service,
        media_service,
        pagination: config.pagination.clone(),
    };

    let app = Router::new()
        .nest("/api", api_router())
        .nest_service(
            &config.storage.media_url,
            ServeDir::new(&config.storage.media_path),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            blogr_api::middleware::auth_middleware,
        ))
        .layer(DefaultBodyLimit::max(config.storage.max_upload_size))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}
