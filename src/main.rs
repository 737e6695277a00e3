//! Bedside notification feed service.
//!
//! Wires the Postgres event source, the patient directory, and the activity
//! log into a running notification feed, then logs every change to it until
//! shutdown.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use bedside_cache::{ActivityLog, CachedPatientDirectory, KeyValueManager};
use bedside_core::config::AppConfig;
use bedside_core::error::AppError;
use bedside_core::traits::alert::AlertSink;
use bedside_database::{CareEventRepository, DatabasePool, PatientRepository};
use bedside_entity::source::{EventSource, PatientDirectory};
use bedside_realtime::{FeedHandle, NotificationFeed, time_ago_now};

#[tokio::main]
async fn main() {
    let env = std::env::var("BEDSIDE_ENV").unwrap_or_else(|_| "development".to_string());

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
        tracing::error!("Service error: {}", e);
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

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting bedside-feed v{}", env!("CARGO_PKG_VERSION"));

    // ── Database ─────────────────────────────────────────────────
    let db_pool = DatabasePool::connect(&config.database).await?;

    // ── Activity log ─────────────────────────────────────────────
    tracing::info!(provider = %config.store.provider, "Initializing key-value store");
    let store = KeyValueManager::new(&config.store).await?;
    let activity = Arc::new(ActivityLog::new(
        Arc::new(store),
        config.store.activity_log_capacity,
    ));

    // ── Collaborators ────────────────────────────────────────────
    let events: Arc<dyn EventSource> = Arc::new(CareEventRepository::new(db_pool.pool().clone()));
    let patients: Arc<dyn PatientDirectory> =
        Arc::new(PatientRepository::new(db_pool.pool().clone()));
    let directory: Arc<dyn PatientDirectory> = if config.patient_cache.enabled {
        Arc::new(CachedPatientDirectory::new(patients, &config.patient_cache))
    } else {
        patients
    };
    let alerts: Arc<dyn AlertSink> = activity.clone();

    // ── Feed ─────────────────────────────────────────────────────
    let feed = NotificationFeed::start(config.feed.clone(), events, directory, alerts).await?;
    let reporter = tokio::spawn(report_changes(feed.handle()));

    shutdown_signal().await;
    tracing::info!("Shutdown signal received");

    feed.shutdown().await;
    let _ = reporter.await;

    match activity.entries().await {
        Ok(entries) if !entries.is_empty() => {
            tracing::info!(alerts = entries.len(), "Alerts recorded during this run");
        }
        Ok(_) => {}
        Err(e) => tracing::warn!(error = %e, "Could not read activity log"),
    }

    db_pool.close().await;
    tracing::info!("bedside-feed shut down");
    Ok(())
}

/// Log the head of the feed every time it changes.
async fn report_changes(handle: FeedHandle) {
    let mut rx = handle.watch();
    while rx.changed().await.is_ok() {
        let snapshot = rx.borrow_and_update().clone();
        if snapshot.loading {
            tracing::debug!("Loading notifications");
            continue;
        }
        match snapshot.notifications.first() {
            Some(latest) => tracing::info!(
                unread = snapshot.unread_count,
                total = snapshot.notifications.len(),
                title = %latest.title,
                patient = %latest.patient_name,
                when = %time_ago_now(latest.timestamp),
                "{}",
                latest.message
            ),
            None => tracing::info!("No recent care events"),
        }
    }
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
