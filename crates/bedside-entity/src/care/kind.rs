//! Care event type enumeration.

use serde::{Deserialize, Serialize};

/// Kind of clinical action a care event records.
///
/// Stored as text. Values this build does not know decode as
/// [`CareEventType::Other`] instead of failing the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareEventType {
    /// Fluid intake.
    Drink,
    /// Meal served.
    Meal,
    /// Medication administered.
    #[serde(rename = "med", alias = "medication")]
    Medication,
    /// Elimination (urine, stool, ...).
    Bathroom,
    /// Free-text clinical note.
    Note,
    /// Anything else.
    #[serde(other)]
    Other,
}

impl CareEventType {
    /// Parse from the stored string value.
    pub fn from_str_value(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "drink" => Self::Drink,
            "meal" => Self::Meal,
            "med" | "medication" => Self::Medication,
            "bathroom" => Self::Bathroom,
            "note" => Self::Note,
            _ => Self::Other,
        }
    }

    /// Return the stored string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Drink => "drink",
            Self::Meal => "meal",
            Self::Medication => "med",
            Self::Bathroom => "bathroom",
            Self::Note => "note",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for CareEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl sqlx::Type<sqlx::Postgres> for CareEventType {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Postgres> for CareEventType {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Postgres as sqlx::Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Postgres> for CareEventType {
    fn decode(
        value: <sqlx::Postgres as sqlx::Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let raw = <&str as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
        Ok(Self::from_str_value(raw))
    }
}
