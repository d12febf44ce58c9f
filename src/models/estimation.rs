//! Estimation records and site units.
//!
//! An estimation record wraps one computation with the client, unit and
//! billing-period details it was made for.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BillTerms, BillTotals, SalaryComponents};

/// The caller-supplied part of an estimation record.
///
/// Totals are deliberately absent: they are always derived from
/// `components`, `terms` and `staff_count` when the record is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEstimation {
    /// The client being billed.
    pub client_id: String,
    /// The site unit the estimation applies to, if any.
    #[serde(default)]
    pub unit_code: Option<String>,
    /// The service or designation label (e.g. "Security Guard").
    pub service: String,
    /// Number of heads ("nos").
    pub staff_count: i64,
    /// Days in the billing month.
    pub month_days: u32,
    /// Billing month, 1-12.
    pub month: u32,
    /// Billing year.
    pub year: i32,
    /// Per-head salary breakdown.
    #[serde(default)]
    pub components: SalaryComponents,
    /// Percentage terms.
    #[serde(default)]
    pub terms: BillTerms,
}

/// A stored estimation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationRecord {
    /// Identifier assigned by the store.
    pub id: Uuid,
    /// The client being billed.
    pub client_id: String,
    /// The site unit the estimation applies to, if any.
    pub unit_code: Option<String>,
    /// The service or designation label.
    pub service: String,
    /// Number of heads.
    pub staff_count: u32,
    /// Days in the billing month.
    pub month_days: u32,
    /// Billing month, 1-12.
    pub month: u32,
    /// Billing year.
    pub year: i32,
    /// Per-head salary breakdown.
    pub components: SalaryComponents,
    /// Percentage terms.
    pub terms: BillTerms,
    /// Totals computed from the inputs above.
    pub totals: BillTotals,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A site unit a client can attach estimations to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Short unit code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// The client that owns the unit, if restricted to one.
    #[serde(default)]
    pub client_id: Option<String>,
}
