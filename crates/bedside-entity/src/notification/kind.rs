//! Notification type enumeration.

use serde::{Deserialize, Serialize};

/// Category of a feed notification.
///
/// Every notification built from a care event is a
/// [`NotificationType::CareRecord`]; the other variants are reserved for
/// future sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    /// Patient record changed.
    PatientUpdate,
    /// A care event was logged.
    CareRecord,
    /// Vital signs recorded.
    VitalSigns,
    /// Medication-specific alert.
    Medication,
}

impl NotificationType {
    /// Return the type as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PatientUpdate => "patient_update",
            Self::CareRecord => "care_record",
            Self::VitalSigns => "vital_signs",
            Self::Medication => "medication",
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
