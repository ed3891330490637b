use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use shopfront_api::{
    handlers::{health, menu},
    state::AppState,
};
use shopfront_core::services::{CategorySyncService, MenuService};
use shopfront_infrastructure::database::connection;
use shopfront_infrastructure::{PgCategoryRepository, PgMenuItemRepository, PgMenuRepository};
use shopfront_shared::config::AppConfig;
use shopfront_shared::AppError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry; the guard flushes file output on shutdown
    let _telemetry_guard = shopfront_shared::telemetry::init_telemetry("shopfront-server");

    info!("Shopfront server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(AppError::ConfigError(e).into());
        }
    };

    // Connect to Database
    info!("Connecting to database...");
    let pool = connection::create_pool(&config.database.url, config.database.max_connections).await?;
    info!("Database connection established.");

    // Apply pending migrations
    sqlx::migrate!("../../migrations").run(&pool).await?;

    // Wire repositories and services
    let menu_repo = Arc::new(PgMenuRepository::new(pool.clone()));
    let item_repo = Arc::new(PgMenuItemRepository::new(pool.clone()));
    let category_repo = Arc::new(PgCategoryRepository::new(pool.clone()));

    let menus = Arc::new(MenuService::new(menu_repo.clone(), item_repo.clone()));
    let category_sync = Arc::new(CategorySyncService::new(
        category_repo,
        menu_repo,
        item_repo,
        config.menu.category_sync_location.clone(),
    ));

    // Create App State
    let state = AppState {
        db: pool,
        config: config.clone(),
        menus,
        category_sync,
    };

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Menu placements
        .route("/api/v1/menus", get(menu::list_menus).post(menu::create_menu))
        // Navigation trees
        .route(
            "/api/v1/menus/{location}/tree",
            get(menu::get_menu_tree).put(menu::save_menu_tree),
        )
        // Category reconciliation trigger
        .route("/api/v1/menus/sync-categories", post(menu::sync_categories))
        // Add State
        .with_state(state)
        // Add CORS
        .layer(
            CorsLayer::new()
                .allow_origin("http://localhost:5173".parse::<axum::http::HeaderValue>().unwrap())
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::PUT,
                    axum::http::Method::DELETE,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::AUTHORIZATION]),
        );

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
