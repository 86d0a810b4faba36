use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use estate_db::{LeadStore, MemoryLeadStore, MemoryStaffStore, PgLeadStore, PgStaffStore, StaffStore};
use estate_events::EventBus;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use estate_api::auth::bootstrap::ensure_admin;
use estate_api::config::ServerConfig;
use estate_api::router::build_app_router;
use estate_api::state::AppState;
use estate_api::ws;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "estate_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());
    let background_cancel = CancellationToken::new();

    // --- Stores ---
    let (leads, staff, listener_handle) =
        match config.database_url.as_deref() {
            Some(database_url) => {
                let pool = estate_db::create_pool(database_url)
                    .await
                    .expect("Failed to connect to database");
                tracing::info!("Database connection pool created");

                estate_db::health_check(&pool)
                    .await
                    .expect("Database health check failed");
                tracing::info!("Database health check passed");

                estate_db::run_migrations(&pool)
                    .await
                    .expect("Failed to run database migrations");
                tracing::info!("Database migrations applied");

                let listener = estate_db::listener::spawn_change_listener(
                    &pool,
                    Arc::clone(&event_bus),
                    background_cancel.clone(),
                )
                .await
                .expect("Failed to start lead change listener");

                (
                    Arc::new(PgLeadStore::new(pool.clone())) as Arc<dyn LeadStore>,
                    Arc::new(PgStaffStore::new(pool)) as Arc<dyn StaffStore>,
                    Some(listener),
                )
            }
            None => {
                tracing::warn!("DATABASE_URL not set, using in-memory stores");
                (
                    Arc::new(MemoryLeadStore::new(Arc::clone(&event_bus))) as Arc<dyn LeadStore>,
                    Arc::new(MemoryStaffStore::new()) as Arc<dyn StaffStore>,
                    None,
                )
            }
        };

    // --- Admin bootstrap ---
    if let Some(admin) = &config.admin {
        ensure_admin(staff.as_ref(), admin)
            .await
            .expect("Failed to bootstrap admin account");
    }

    // --- App state ---
    let state = AppState::new(config.clone(), leads, staff, Arc::clone(&event_bus));
    let ws_manager = Arc::clone(&state.ws_manager);

    // --- Background tasks ---
    let heartbeat_handle = ws::start_heartbeat(Arc::clone(&ws_manager), background_cancel.clone());
    let forwarder_handle = ws::start_change_forwarder(
        Arc::clone(&event_bus),
        Arc::clone(&ws_manager),
        background_cancel.clone(),
    );
    tracing::info!("Change forwarder and heartbeat started");

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    background_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), forwarder_handle).await;
    let _ = tokio::time::timeout(Duration::from_secs(5), heartbeat_handle).await;
    if let Some(handle) = listener_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
    }
    tracing::info!("Background tasks stopped");

    let ws_count = ws_manager.connection_count().await;
    tracing::info!(ws_count, "Closing remaining WebSocket connections");
    ws_manager.shutdown_all().await;

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT, starting graceful shutdown"),
        () = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
