//! Estimation record lifecycle.
//!
//! [`EstimationService`] validates a record, recomputes its totals and only
//! then hands it to the repository, so a stored record always carries totals
//! derived from its own inputs.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::calculation::{compute_totals, validate_month_days, validate_staff_count};
use crate::config::ConfigLoader;
use crate::error::{EstimatorError, EstimatorResult};
use crate::models::{BillTotals, EstimationRecord, NewEstimation};

use super::repository::EstimationRepository;

/// Creates, updates and queries estimation records.
#[derive(Clone)]
pub struct EstimationService {
    repository: Arc<dyn EstimationRepository>,
    config: Option<Arc<ConfigLoader>>,
}

impl EstimationService {
    /// Creates a service over a repository.
    ///
    /// When `config` is given, unit codes are checked against its unit
    /// catalogue.
    pub fn new(repository: Arc<dyn EstimationRepository>, config: Option<Arc<ConfigLoader>>) -> Self {
        Self { repository, config }
    }

    fn validate(&self, estimation: &NewEstimation) -> EstimatorResult<(u32, BillTotals)> {
        if estimation.client_id.trim().is_empty() {
            return Err(EstimatorError::invalid_input("client_id", "must not be empty"));
        }
        if estimation.service.trim().is_empty() {
            return Err(EstimatorError::invalid_input("service", "must not be empty"));
        }
        if !(1..=12).contains(&estimation.month) {
            return Err(EstimatorError::invalid_input(
                "month",
                format!("must be between 1 and 12, got {}", estimation.month),
            ));
        }
        validate_month_days(estimation.month_days)?;

        if let (Some(code), Some(config)) = (&estimation.unit_code, &self.config) {
            let unit = config.get_unit(code)?;
            if unit
                .client_id
                .as_deref()
                .is_some_and(|owner| owner != estimation.client_id)
            {
                return Err(EstimatorError::invalid_input(
                    "unit_code",
                    format!(
                        "unit '{}' does not belong to client '{}'",
                        code, estimation.client_id
                    ),
                ));
            }
        }

        let staff_count = validate_staff_count(estimation.staff_count)?;
        let totals = compute_totals(&estimation.components, &estimation.terms, estimation.staff_count)?;
        Ok((staff_count, totals))
    }

    /// Validates, computes and stores a new record.
    pub fn create(&self, estimation: NewEstimation) -> EstimatorResult<EstimationRecord> {
        let (staff_count, totals) = self.validate(&estimation)?;
        let record = self.repository.create(estimation, staff_count, totals)?;
        info!(
            estimation_id = %record.id,
            client_id = %record.client_id,
            grand_total = %record.totals.grand_total,
            "Estimation created"
        );
        Ok(record)
    }

    /// Recomputes and replaces an existing record.
    ///
    /// The stored record is left untouched if validation fails.
    pub fn update(&self, id: Uuid, estimation: NewEstimation) -> EstimatorResult<EstimationRecord> {
        let (staff_count, totals) = self.validate(&estimation)?;
        let record = self.repository.update(id, estimation, staff_count, totals)?;
        info!(
            estimation_id = %record.id,
            grand_total = %record.totals.grand_total,
            "Estimation updated"
        );
        Ok(record)
    }

    /// Fetches a record.
    pub fn get(&self, id: Uuid) -> EstimatorResult<EstimationRecord> {
        self.repository.get(id)
    }

    /// Deletes a record.
    pub fn delete(&self, id: Uuid) -> EstimatorResult<()> {
        self.repository.delete(id)?;
        info!(estimation_id = %id, "Estimation deleted");
        Ok(())
    }

    /// Lists records, optionally for a single client.
    pub fn list(&self, client_id: Option<&str>) -> EstimatorResult<Vec<EstimationRecord>> {
        let records = self.repository.list(client_id)?;
        debug!(client_id = ?client_id, count = records.len(), "Listed estimations");
        Ok(records)
    }
}
