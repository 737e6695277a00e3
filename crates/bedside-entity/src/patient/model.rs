//! Patient entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use bedside_core::types::id::PatientId;

/// A patient as stored in the `patients` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Patient {
    /// Unique patient identifier.
    pub id: PatientId,
    /// Display name.
    pub full_name: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}
