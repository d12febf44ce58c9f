//! Estimation record persistence.
//!
//! This module defines the [`EstimationRepository`] seam and an in-memory
//! implementation of it.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use uuid::Uuid;

use crate::error::{EstimatorError, EstimatorResult};
use crate::models::{BillTotals, EstimationRecord, NewEstimation};

/// Storage for estimation records.
///
/// Implementations assign identifiers and timestamps. They store the totals
/// they are given and never compute them.
pub trait EstimationRepository: Send + Sync {
    /// Stores a new record and returns it with its assigned identifier.
    fn create(
        &self,
        estimation: NewEstimation,
        staff_count: u32,
        totals: BillTotals,
    ) -> EstimatorResult<EstimationRecord>;

    /// Fetches a record by identifier.
    fn get(&self, id: Uuid) -> EstimatorResult<EstimationRecord>;

    /// Replaces the inputs and totals of an existing record.
    fn update(
        &self,
        id: Uuid,
        estimation: NewEstimation,
        staff_count: u32,
        totals: BillTotals,
    ) -> EstimatorResult<EstimationRecord>;

    /// Deletes a record by identifier.
    fn delete(&self, id: Uuid) -> EstimatorResult<()>;

    /// Lists records oldest first, optionally only those of one client.
    fn list(&self, client_id: Option<&str>) -> EstimatorResult<Vec<EstimationRecord>>;
}

/// An [`EstimationRepository`] held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryEstimationRepository {
    records: RwLock<HashMap<Uuid, EstimationRecord>>,
}

impl InMemoryEstimationRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock still holds consistent data: records are only ever
    // inserted or removed whole.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<Uuid, EstimationRecord>> {
        self.records.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Uuid, EstimationRecord>> {
        self.records.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl EstimationRepository for InMemoryEstimationRepository {
    fn create(
        &self,
        estimation: NewEstimation,
        staff_count: u32,
        totals: BillTotals,
    ) -> EstimatorResult<EstimationRecord> {
        let now = Utc::now();
        let record = EstimationRecord {
            id: Uuid::new_v4(),
            client_id: estimation.client_id,
            unit_code: estimation.unit_code,
            service: estimation.service,
            staff_count,
            month_days: estimation.month_days,
            month: estimation.month,
            year: estimation.year,
            components: estimation.components,
            terms: estimation.terms,
            totals,
            created_at: now,
            updated_at: now,
        };
        self.write().insert(record.id, record.clone());
        Ok(record)
    }

    fn get(&self, id: Uuid) -> EstimatorResult<EstimationRecord> {
        self.read()
            .get(&id)
            .cloned()
            .ok_or(EstimatorError::EstimationNotFound { id })
    }

    fn update(
        &self,
        id: Uuid,
        estimation: NewEstimation,
        staff_count: u32,
        totals: BillTotals,
    ) -> EstimatorResult<EstimationRecord> {
        let mut records = self.write();
        let existing = records
            .get(&id)
            .ok_or(EstimatorError::EstimationNotFound { id })?;

        let record = EstimationRecord {
            id,
            client_id: estimation.client_id,
            unit_code: estimation.unit_code,
            service: estimation.service,
            staff_count,
            month_days: estimation.month_days,
            month: estimation.month,
            year: estimation.year,
            components: estimation.components,
            terms: estimation.terms,
            totals,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        records.insert(id, record.clone());
        Ok(record)
    }

    fn delete(&self, id: Uuid) -> EstimatorResult<()> {
        self.write()
            .remove(&id)
            .map(|_| ())
            .ok_or(EstimatorError::EstimationNotFound { id })
    }

    fn list(&self, client_id: Option<&str>) -> EstimatorResult<Vec<EstimationRecord>> {
        let mut records: Vec<EstimationRecord> = self
            .read()
            .values()
            .filter(|r| client_id.is_none_or(|c| r.client_id == c))
            .cloned()
            .collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(records)
    }
}
