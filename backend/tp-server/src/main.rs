use tp_server::{AppState, build_router, logger};

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use log::{error, info, warn};
use tokio::net::TcpListener;
use tp_config::Config;
use tp_db::Database;
use tp_relay::{DeliveryQueue, RelayMetrics, TelegramBotClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    // Relative log file paths live in the config directory
    let log_file_path: Option<PathBuf> = match config.logging.file {
        Some(ref file) if PathBuf::from(file).is_absolute() => Some(PathBuf::from(file)),
        Some(ref file) => Some(Config::config_dir()?.join(file)),
        None => None,
    };

    // Initialize logger (before any other logging)
    logger::initialize(
        config.effective_log_level(),
        log_file_path,
        config.logging.colored,
    )?;

    info!("Starting tp-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Open the user store
    let database_path = config.database_path()?;
    info!("Opening database: {}", database_path.display());
    let database = Database::open(&database_path).await?;
    info!("Database ready");

    // Bot API client: delivery channel and webhook registration
    let bot = Arc::new(TelegramBotClient::new(
        &config.telegram.api_url,
        &config.telegram.bot_token,
    )?);

    if let Err(e) = bot.set_webhook(&config.webhook_url()).await {
        warn!(
            "Failed to register webhook (contact events will not arrive until it is set): {}",
            e
        );
    }

    let metrics = RelayMetrics::new();
    let (queue, delivery_worker) = DeliveryQueue::start(bot, metrics.clone());

    let app_state = AppState::new(&config, database.clone(), queue, metrics)?;
    let app = build_router(app_state);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    // Serving ends once the signal fires and open connections finish
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router (and with it every queue handle) is gone; flush pending deliveries
    info!("Waiting for pending deliveries");
    let attempted = delivery_worker.join().await;
    info!("Delivery worker finished ({} deliveries)", attempted);

    database.close().await;
    info!("Shutdown complete");

    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for SIGINT: {}", e);
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
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown"),
    }
}
