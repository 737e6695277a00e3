//! Patient repository implementing the patient directory.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use bedside_core::error::{AppError, ErrorKind};
use bedside_core::result::AppResult;
use bedside_core::types::id::PatientId;
use bedside_entity::patient::Patient;
use bedside_entity::source::PatientDirectory;

/// Postgres-backed [`PatientDirectory`] over the `patients` table.
#[derive(Debug, Clone)]
pub struct PatientRepository {
    pool: PgPool,
}

impl PatientRepository {
    /// Create a new patient repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PatientDirectory for PatientRepository {
    async fn lookup_many(&self, ids: &HashSet<PatientId>) -> AppResult<HashMap<PatientId, Patient>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let raw: Vec<Uuid> = ids.iter().map(|id| id.into_uuid()).collect();
        let patients = sqlx::query_as::<_, Patient>(
            "SELECT id, full_name, created_at FROM patients WHERE id = ANY($1)",
        )
        .bind(&raw)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to look up patients", e))?;

        Ok(patients.into_iter().map(|p| (p.id, p)).collect())
    }

    async fn lookup_one(&self, id: PatientId) -> AppResult<Option<Patient>> {
        sqlx::query_as::<_, Patient>("SELECT id, full_name, created_at FROM patients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to look up patient", e))
    }
}
