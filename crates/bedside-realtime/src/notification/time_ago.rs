//! Relative time labels for the notification list.

use chrono::{DateTime, Utc};

/// Relative label for `timestamp` as seen at `now`.
///
/// Each tier floors: under a minute is "Agora", then minutes, hours, and
/// days. Timestamps in the future also read "Agora".
pub fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - timestamp;

    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "Agora".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m atrás");
    }

    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{hours}h atrás");
    }

    format!("{}d atrás", elapsed.num_days())
}

/// [`time_ago`] against the current wall clock.
pub fn time_ago_now(timestamp: DateTime<Utc>) -> String {
    time_ago(timestamp, Utc::now())
}
