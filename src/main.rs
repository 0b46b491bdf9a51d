//! Fishroom relay server.
//!
//! Loads configuration, connects to Redis, starts the archiver and serves
//! the HTTP/websocket surface until interrupted or the archiver stops.

use std::sync::Arc;

use tokio::sync::{oneshot, watch};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fishroom_relay::adapters::http::{app_router, RelayPorts, RelayRoutes};
use fishroom_relay::adapters::{
    RedisClientDirectory, RedisLogStore, RedisMessageBus, RedisPollQueue,
};
use fishroom_relay::application::ChatArchiver;
use fishroom_relay::config::{AppConfig, ConfigValidationError, ServerConfig};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.server);

    let addr = config.server.socket_addr()?;
    let clock = config
        .chatlog
        .clock()
        .ok_or(ConfigValidationError::InvalidUtcOffset)?;

    let client = redis::Client::open(config.redis.url.as_str())?;
    let conn = tokio::time::timeout(
        config.redis.timeout(),
        client.get_multiplexed_tokio_connection(),
    )
    .await
    .map_err(|_| "Timed out connecting to Redis")??;
    tracing::info!("Connected to Redis");

    let ports = RelayPorts {
        bus: Arc::new(RedisMessageBus::new(client.clone(), conn.clone())),
        store: Arc::new(RedisLogStore::new(conn.clone())),
        queue: Arc::new(RedisPollQueue::new(client, conn.clone())),
        directory: Arc::new(RedisClientDirectory::new(conn)),
        clock: Arc::new(clock),
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (archiver_done_tx, archiver_done_rx) = oneshot::channel();
    let archiver = ChatArchiver::new(
        ports.bus.clone(),
        ports.store.clone(),
        ports.queue.clone(),
        ports.directory.clone(),
    );
    let archiver_task = tokio::spawn(async move {
        let result = archiver.run(shutdown_rx).await;
        let _ = archiver_done_tx.send(());
        result
    });

    let routes = RelayRoutes::wire(&ports, &config.chatlog, &config.poll)?;
    let app = app_router(routes, &config.server);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Fishroom relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(archiver_done_rx))
        .await?;

    let _ = shutdown_tx.send(true);
    archiver_task.await??;
    tracing::info!("Fishroom relay stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if server.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Resolves on Ctrl-C, SIGTERM, or when the archiver exits on its own.
async fn shutdown_signal(archiver_done: oneshot::Receiver<()>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Shutdown requested"),
        _ = terminate => tracing::info!("Terminate signal received"),
        _ = archiver_done => tracing::warn!("Archiver exited, shutting down"),
    }
}
