//! Postgres pool for the care record store.

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use bedside_core::config::{DatabaseConfig, redact_url};
use bedside_core::error::{AppError, ErrorKind};
use bedside_core::result::AppResult;

/// Pool shared by [`CareEventRepository`](crate::CareEventRepository) and
/// [`PatientRepository`](crate::PatientRepository).
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open the pool and, if configured, bring the schema up to date.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        info!(
            url = %redact_url(&config.url),
            max_connections = config.max_connections,
            "Connecting to care record store"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout())
            .idle_timeout(config.idle_timeout())
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Cannot reach {}", redact_url(&config.url)),
                    e,
                )
            })?;

        if config.run_migrations {
            crate::migration::run_migrations(&pool).await?;
        }

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Wait for checked-out connections and close the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Care record store pool closed");
    }
}
