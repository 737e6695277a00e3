//! Patient directory decorator caching single lookups.
//!
//! The realtime path resolves one patient per pushed event. Wards log many
//! events for the same few patients, so hits are cached for a short TTL.
//! Misses and failures are never cached.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

use bedside_core::config::PatientCacheConfig;
use bedside_core::result::AppResult;
use bedside_core::types::id::PatientId;
use bedside_entity::patient::Patient;
use bedside_entity::source::PatientDirectory;

/// Caches patients returned by the wrapped directory.
#[derive(Debug, Clone)]
pub struct CachedPatientDirectory {
    inner: Arc<dyn PatientDirectory>,
    cache: Cache<PatientId, Patient>,
}

impl CachedPatientDirectory {
    /// Wrap `inner` with a cache sized by `config`.
    pub fn new(inner: Arc<dyn PatientDirectory>, config: &PatientCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.time_to_live_seconds))
            .build();

        Self { inner, cache }
    }
}

#[async_trait]
impl PatientDirectory for CachedPatientDirectory {
    async fn lookup_many(&self, ids: &HashSet<PatientId>) -> AppResult<HashMap<PatientId, Patient>> {
        let found = self.inner.lookup_many(ids).await?;
        for patient in found.values() {
            self.cache.insert(patient.id, patient.clone()).await;
        }
        Ok(found)
    }

    async fn lookup_one(&self, id: PatientId) -> AppResult<Option<Patient>> {
        if let Some(patient) = self.cache.get(&id).await {
            debug!(patient_id = %id, "Patient cache hit");
            return Ok(Some(patient));
        }

        let found = self.inner.lookup_one(id).await?;
        if let Some(patient) = &found {
            self.cache.insert(id, patient.clone()).await;
        }
        Ok(found)
    }
}
