mod core;
mod features;
mod shared;

use crate::core::config::{AppConfig, Config};
use crate::core::{database, middleware};
use crate::features::items::{routes as items_routes, ItemService, PgItemRepository};
use crate::features::seeders;
use crate::features::users::{
    routes as users_routes, PgLevelRepository, PgUserRepository, UserService,
};
use axum::Router;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!(
        "Configuration loaded: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    if std::env::args().nth(1).as_deref() == Some("seed") {
        let total = seeders::run_all(&pool, &config.seeder)
            .await
            .map_err(|e| anyhow::anyhow!("Seeding failed: {}", e))?;
        tracing::info!("Seeding finished, {} rows inserted", total);
        return Ok(());
    }

    let view_count = shared::views::init_views(&config.views.dir);
    tracing::info!("Loaded {} views from '{}'", view_count, config.views.dir);

    let item_service = Arc::new(ItemService::new(Arc::new(PgItemRepository::new(
        pool.clone(),
    ))));
    let user_service = Arc::new(UserService::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgLevelRepository::new(pool.clone())),
    ));
    tracing::info!("Services initialized");

    let app = build_app(&config.app, item_service, user_service);

    serve(&config.app, app).await
}

async fn health_check() -> axum::http::StatusCode {
    axum::http::StatusCode::OK
}

fn build_app(
    config: &AppConfig,
    item_service: Arc<ItemService>,
    user_service: Arc<UserService>,
) -> Router {
    Router::new()
        .merge(items_routes::routes(item_service))
        .merge(users_routes::routes(user_service))
        .route("/health", axum::routing::get(health_check))
        .layer(RequestBodyLimitLayer::new(config.max_request_body_size))
        .layer(middleware::cors_layer(config.cors_allowed_origins.clone()))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}

async fn serve(config: &AppConfig, app: Router) -> anyhow::Result<()> {
    let addr = config.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
    socket.set_tcp_keepalive(&keepalive)?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{InMemoryItemRepository, InMemoryUserStore};
    use axum::http::StatusCode;
    use axum_test::TestServer;

    fn test_config() -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_allowed_origins: vec!["*".to_string()],
            max_request_body_size: 1024,
        }
    }

    fn server() -> TestServer {
        let store = Arc::new(InMemoryUserStore::with_default_levels());
        let app = build_app(
            &test_config(),
            Arc::new(ItemService::new(Arc::new(InMemoryItemRepository::default()))),
            Arc::new(UserService::new(store.clone(), store)),
        );
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_health_carries_request_id() {
        let response = server().get("/health").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert!(response.maybe_header("x-request-id").is_some());
    }

    #[tokio::test]
    async fn test_both_modules_are_mounted() {
        let server = server();
        assert_eq!(server.get("/items").await.status_code(), StatusCode::OK);
        assert_eq!(server.get("/user").await.status_code(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let server = server();
        let long = "x".repeat(4096);
        let response = server
            .post("/items")
            .form(&[("name", "Pen"), ("description", long.as_str())])
            .await;
        assert!(response.status_code().is_client_error());
        assert!(!server.get("/items").await.text().contains("Pen"));
    }
}
