//! Care event repository: range queries and the insert subscription.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use serde::Deserialize;
use sqlx::PgPool;
use sqlx::postgres::PgListener;
use tracing::{debug, info};

use bedside_core::error::{AppError, ErrorKind};
use bedside_core::result::AppResult;
use bedside_core::types::id::CareEventId;
use bedside_entity::care::CareEvent;
use bedside_entity::source::{EventSource, EventSubscription};

/// `NOTIFY` channel written by the `care_records_insert_notify` trigger.
pub const INSERT_CHANNEL: &str = "care_records_insert";

const SELECT_COLUMNS: &str = "id, type, created_at, patient_id, volume, meal_desc, med_name, \
                              med_dose, bathroom_type, notes";

/// Postgres-backed [`EventSource`] over the `care_records` table.
///
/// The insert trigger publishes only `{"id": ...}`; each notification is
/// turned into a full event by reading the row back.
#[derive(Debug, Clone)]
pub struct CareEventRepository {
    pool: PgPool,
}

/// Body of an insert notification.
#[derive(Debug, Deserialize)]
struct InsertPayload {
    id: CareEventId,
}

impl CareEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventSource for CareEventRepository {
    async fn query_recent(&self, since: DateTime<Utc>, limit: usize) -> AppResult<Vec<CareEvent>> {
        let events = sqlx::query_as::<_, CareEvent>(&format!(
            "SELECT {SELECT_COLUMNS} FROM care_records WHERE created_at >= $1 \
             ORDER BY created_at DESC LIMIT $2"
        ))
        .bind(since)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to query recent care records", e)
        })?;

        debug!(count = events.len(), since = %since, "Loaded recent care records");
        Ok(events)
    }

    async fn subscribe_inserts(&self) -> AppResult<EventSubscription> {
        let mut listener = PgListener::connect_with(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to open notification listener", e)
        })?;

        listener.listen(INSERT_CHANNEL).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to LISTEN on '{INSERT_CHANNEL}'"),
                e,
            )
        })?;

        info!(channel = INSERT_CHANNEL, "Subscribed to care record inserts");

        let pool = self.pool.clone();
        let stream = listener
            .into_stream()
            .then(move |item| {
                let pool = pool.clone();
                async move {
                    let notification = item.map_err(|e| {
                        AppError::with_source(ErrorKind::Database, "Notification listener error", e)
                    })?;
                    let id = decode_insert_payload(notification.payload())?;
                    fetch_inserted(&pool, id).await
                }
            })
            .boxed();

        Ok(EventSubscription::new(stream).with_release_hook(|| {
            info!(channel = INSERT_CHANNEL, "Unsubscribed from care record inserts");
        }))
    }
}

/// Extract the row id from an insert notification.
pub(crate) fn decode_insert_payload(payload: &str) -> AppResult<CareEventId> {
    serde_json::from_str::<InsertPayload>(payload)
        .map(|p| p.id)
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("Malformed care record notification: {e}"),
                e,
            )
        })
}

/// Read back a row announced by the trigger. A row deleted before it could
/// be read is `NotFound`; the feed skips it.
async fn fetch_inserted(pool: &PgPool, id: CareEventId) -> AppResult<CareEvent> {
    sqlx::query_as::<_, CareEvent>(&format!(
        "SELECT {SELECT_COLUMNS} FROM care_records WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read inserted care record", e))?
    .ok_or_else(|| AppError::not_found(format!("Care record {id} vanished before it was read")))
}
