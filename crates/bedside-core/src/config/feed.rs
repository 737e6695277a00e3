//! Notification feed configuration.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Longest accepted lookback window: one year.
pub const MAX_LOOKBACK_HOURS: i64 = 24 * 365;

/// Settings for the notification feed manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// How far back the initial load looks, in hours.
    #[serde(default = "default_lookback_hours")]
    pub lookback_hours: i64,
    /// Maximum number of care events fetched by one load.
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,
    /// Maximum number of notifications retained in the feed.
    #[serde(default = "default_max_notifications")]
    pub max_notifications: usize,
    /// Capacity of the bounded channel between the subscription and the feed.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
    /// Display name used when a loaded event references an unknown patient.
    #[serde(default = "default_unknown_patient_name")]
    pub unknown_patient_name: String,
    /// Display name used when a pushed event's patient cannot be resolved.
    #[serde(default = "default_placeholder_patient_name")]
    pub placeholder_patient_name: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            lookback_hours: default_lookback_hours(),
            fetch_limit: default_fetch_limit(),
            max_notifications: default_max_notifications(),
            channel_buffer_size: default_channel_buffer(),
            unknown_patient_name: default_unknown_patient_name(),
            placeholder_patient_name: default_placeholder_patient_name(),
        }
    }
}

impl FeedConfig {
    /// Reject values the feed cannot run with.
    pub fn validate(&self) -> AppResult<()> {
        if !(1..=MAX_LOOKBACK_HOURS).contains(&self.lookback_hours) {
            return Err(AppError::validation(format!(
                "feed.lookback_hours must be between 1 and {MAX_LOOKBACK_HOURS}, got {}",
                self.lookback_hours
            )));
        }
        if self.fetch_limit == 0 {
            return Err(AppError::validation("feed.fetch_limit must be at least 1"));
        }
        if self.max_notifications == 0 {
            return Err(AppError::validation(
                "feed.max_notifications must be at least 1",
            ));
        }
        if self.channel_buffer_size == 0 {
            return Err(AppError::validation(
                "feed.channel_buffer_size must be at least 1",
            ));
        }
        Ok(())
    }

    /// The lookback window. Fails instead of overflowing on an
    /// unvalidated config.
    pub fn lookback(&self) -> AppResult<TimeDelta> {
        TimeDelta::try_hours(self.lookback_hours).ok_or_else(|| {
            AppError::validation(format!(
                "feed.lookback_hours out of range: {}",
                self.lookback_hours
            ))
        })
    }

    /// Oldest `created_at` a load includes, as seen at `now`.
    pub fn window_start(&self, now: DateTime<Utc>) -> AppResult<DateTime<Utc>> {
        now.checked_sub_signed(self.lookback()?).ok_or_else(|| {
            AppError::validation(format!(
                "feed.lookback_hours reaches before the earliest representable time: {}",
                self.lookback_hours
            ))
        })
    }
}

fn default_lookback_hours() -> i64 {
    24
}

fn default_fetch_limit() -> usize {
    20
}

fn default_max_notifications() -> usize {
    15
}

fn default_channel_buffer() -> usize {
    64
}

fn default_unknown_patient_name() -> String {
    "Paciente desconhecido".to_string()
}

fn default_placeholder_patient_name() -> String {
    "Paciente".to_string()
}
