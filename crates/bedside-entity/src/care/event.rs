//! Care event entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use bedside_core::types::id::{CareEventId, PatientId};

use super::kind::CareEventType;

/// A recorded clinical action, as stored in the `care_records` table.
///
/// Payload fields are optional; which ones are present depends on
/// [`CareEvent::event_type`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CareEvent {
    /// Unique event identifier.
    pub id: CareEventId,
    /// What kind of action was recorded.
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub event_type: CareEventType,
    /// When the action was recorded.
    pub created_at: DateTime<Utc>,
    /// The patient the action concerns.
    pub patient_id: PatientId,
    /// Fluid volume in millilitres (`drink`).
    #[serde(default)]
    pub volume: Option<i32>,
    /// Meal description (`meal`).
    #[serde(default)]
    pub meal_desc: Option<String>,
    /// Medication name (`med`).
    #[serde(default)]
    pub med_name: Option<String>,
    /// Medication dose (`med`).
    #[serde(default)]
    pub med_dose: Option<String>,
    /// Elimination subtype (`bathroom`).
    #[serde(default)]
    pub bathroom_type: Option<String>,
    /// Free-text notes (`note`, optional elsewhere).
    #[serde(default)]
    pub notes: Option<String>,
}

impl CareEvent {
    /// Create an event with no payload fields.
    pub fn new(event_type: CareEventType, patient_id: PatientId, created_at: DateTime<Utc>) -> Self {
        Self {
            id: CareEventId::new(),
            event_type,
            created_at,
            patient_id,
            volume: None,
            meal_desc: None,
            med_name: None,
            med_dose: None,
            bathroom_type: None,
            notes: None,
        }
    }
}
