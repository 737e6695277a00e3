//! Initial/refresh load: recent events plus one batched name lookup.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use bedside_core::config::FeedConfig;
use bedside_core::result::AppResult;
use bedside_core::types::id::{NotificationId, PatientId};
use bedside_entity::notification::Notification;
use bedside_entity::source::{EventSource, PatientDirectory};

use crate::notification::formatter::NotificationFormatter;

/// Fetch the events of the lookback window and turn them into
/// notifications, newest first, at most `max_notifications`.
///
/// An empty window short-circuits before the directory is called.
pub async fn load_notifications(
    events: &Arc<dyn EventSource>,
    directory: &Arc<dyn PatientDirectory>,
    config: &FeedConfig,
) -> AppResult<Vec<Notification>> {
    let since = config.window_start(Utc::now())?;
    let recent = events.query_recent(since, config.fetch_limit).await?;

    if recent.is_empty() {
        debug!(since = %since, "No care events in lookback window");
        return Ok(Vec::new());
    }

    let patient_ids: HashSet<PatientId> = recent.iter().map(|e| e.patient_id).collect();
    let patients = directory.lookup_many(&patient_ids).await?;

    let mut notifications: Vec<Notification> = recent
        .iter()
        .map(|event| {
            let name = patients
                .get(&event.patient_id)
                .map(|p| p.full_name.as_str())
                .unwrap_or(config.unknown_patient_name.as_str());
            NotificationFormatter::care_record(event, name)
        })
        .collect();

    notifications.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let mut seen: HashSet<NotificationId> = HashSet::new();
    notifications.retain(|n| seen.insert(n.id.clone()));
    notifications.truncate(config.max_notifications);

    debug!(
        events = recent.len(),
        patients = patients.len(),
        kept = notifications.len(),
        "Built notifications from recent care events"
    );
    Ok(notifications)
}
