//! Watchdog server. Dead-man's-switch timers with Telegram notifications.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use watchdog_auth::{JwtDecoder, JwtEncoder};
use watchdog_core::config::AppConfig;
use watchdog_core::error::AppError;
use watchdog_core::traits::{MessageSender, NoopSender, Notifier};
use watchdog_database::DatabasePool;
use watchdog_database::repositories::{TimerRepository, UserRepository};
use watchdog_service::{AccessService, NotificationDispatcher, TimerService, UserService};
use watchdog_telegram::listener::login_url;
use watchdog_telegram::{StartListener, TelegramClient, TelegramSender};
use watchdog_worker::{ExpiryScanner, ExpiryScheduler};

#[tokio::main]
async fn main() {
    let env = std::env::var("WATCHDOG_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Watchdog v{}", env!("CARGO_PKG_VERSION"));
    let config = Arc::new(config);

    // ── Step 1: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;
    watchdog_database::migration::run_migrations(db.pool()).await?;
    tracing::info!("Database migrations complete");

    let user_repo = Arc::new(UserRepository::new(db.pool().clone()));
    let timer_repo = Arc::new(TimerRepository::new(db.pool().clone()));

    // ── Step 2: Messaging channel ────────────────────────────────
    let telegram = if config.telegram.is_enabled() {
        Some(Arc::new(TelegramClient::new(&config.telegram)?))
    } else {
        tracing::warn!("No Telegram bot token configured, notifications are disabled");
        None
    };

    let mut bot_login_url = None;
    let sender: Arc<dyn MessageSender> = match &telegram {
        Some(client) => {
            match client.get_me().await {
                Ok(bot) => match bot.username.as_deref() {
                    Some(username) => {
                        let url = login_url(username);
                        tracing::info!(url = %url, "Telegram bot ready");
                        bot_login_url = Some(url);
                    }
                    None => tracing::warn!("Telegram bot has no username"),
                },
                Err(e) => tracing::warn!(error = %e, "Could not query Telegram bot identity"),
            }
            Arc::new(TelegramSender::new(Arc::clone(client)))
        }
        None => Arc::new(NoopSender),
    };

    // ── Step 3: Services ─────────────────────────────────────────
    let notifier: Arc<dyn Notifier> = Arc::new(NotificationDispatcher::new(
        Arc::clone(&user_repo),
        sender,
    ));
    let timer_service = Arc::new(TimerService::new(
        Arc::clone(&timer_repo),
        Arc::clone(&notifier),
    ));
    let user_service = Arc::new(UserService::new(Arc::clone(&user_repo)));
    let access_service = Arc::new(AccessService::new(
        Arc::clone(&user_repo),
        Arc::clone(&timer_repo),
        Arc::new(JwtEncoder::new(&config.auth)?),
        Arc::new(JwtDecoder::new(&config.auth)),
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Step 4: Expiry scanner ───────────────────────────────────
    let mut scheduler = if config.scanner.enabled {
        let scanner = Arc::new(ExpiryScanner::new(
            Arc::clone(&timer_repo),
            Arc::clone(&notifier),
            &config.scanner,
        ));
        let scheduler = ExpiryScheduler::new(scanner, config.scanner.interval_seconds).await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::warn!("Expiry scanner disabled");
        None
    };

    // ── Step 5: Telegram /start listener ─────────────────────────
    let listener_handle = telegram.map(|client| {
        let listener = StartListener::new(
            client,
            Arc::clone(&user_service),
            config.telegram.poll_timeout_seconds,
        );
        tokio::spawn(listener.run(shutdown_rx.clone()))
    });

    // ── Step 6: HTTP server ──────────────────────────────────────
    let state = watchdog_api::AppState::new(
        Arc::clone(&config),
        db.clone(),
        timer_service,
        access_service,
        bot_login_url,
    );
    let app = watchdog_api::build_app(state);

    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    watchdog_api::serve(app, &config.server.host, config.server.port, shutdown_rx).await?;

    // ── Step 7: Wait for background tasks ────────────────────────
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    if let Some(scheduler) = scheduler.as_mut() {
        if let Err(e) = scheduler.shutdown().await {
            tracing::warn!(error = %e, "Expiry scheduler did not stop cleanly");
        }
    }
    if let Some(handle) = listener_handle {
        let _ = tokio::time::timeout(grace, handle).await;
    }

    db.close().await;
    tracing::info!("Watchdog server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
