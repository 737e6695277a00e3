//! Embedded schema for `patients` and `care_records`, including the
//! insert trigger the realtime feed listens to.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use bedside_core::error::{AppError, ErrorKind};
use bedside_core::result::AppResult;

/// Every file under `migrations/`, compiled in.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply whatever part of [`MIGRATOR`] the database has not seen yet.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, "Care record schema migration failed", e)
    })?;

    info!(known = MIGRATOR.iter().count(), "Care record schema up to date");
    Ok(())
}
