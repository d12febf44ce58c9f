//! Bill totals and audited estimate models.
//!
//! This module contains the [`BillTotals`] snapshot produced by the
//! estimator and the [`BillEstimate`] type that pairs those totals with an
//! audit trace of every derived amount.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The fully derived billing figures for one estimation.
///
/// Every field is a pure function of the salary components, the terms and
/// the staff count. Totals are always recomputed as a whole, never patched.
///
/// # Example
///
/// ```
/// use axis_billing::models::BillTotals;
/// use rust_decimal::Decimal;
///
/// let totals = BillTotals {
///     gross_salary: Decimal::from(15000),
///     epf_amount: Decimal::from(1560),
///     esi_amount: Decimal::from(488),
///     bonus_amount: Decimal::from(833),
///     leave_amount: Decimal::from(500),
///     gratuity_amount: Decimal::from(481),
///     holiday_amount: Decimal::ZERO,
///     service_charge_amount: Decimal::from(1886),
///     total_per_head: Decimal::from(20748),
///     grand_total: Decimal::from(41496),
/// };
/// assert_eq!(totals.sub_total(), Decimal::from(18862));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillTotals {
    /// Sum of all salary components, unrounded.
    pub gross_salary: Decimal,
    /// Employer EPF contribution.
    pub epf_amount: Decimal,
    /// Employer ESI contribution.
    pub esi_amount: Decimal,
    /// Statutory bonus.
    pub bonus_amount: Decimal,
    /// Leave provision.
    pub leave_amount: Decimal,
    /// Gratuity provision.
    pub gratuity_amount: Decimal,
    /// Holiday allowance.
    pub holiday_amount: Decimal,
    /// Service charge on the subtotal.
    pub service_charge_amount: Decimal,
    /// Billable amount for one head.
    pub total_per_head: Decimal,
    /// Billable amount for the whole staff count.
    pub grand_total: Decimal,
}

impl BillTotals {
    /// The subtotal the service charge was applied to.
    pub fn sub_total(&self) -> Decimal {
        self.total_per_head - self.service_charge_amount
    }

    /// The sum of all derived employer contributions, excluding service charge.
    pub fn contributions_total(&self) -> Decimal {
        self.epf_amount
            + self.esi_amount
            + self.bonus_amount
            + self.leave_amount
            + self.gratuity_amount
            + self.holiday_amount
    }
}

/// A single step in the audit trace recording how one amount was derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Description of the amount the rule was applied to (e.g. "basic + da").
    pub basis: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the derivation.
    pub reasoning: String,
}

/// The complete audit trace for an estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// All derivation steps, in the order they were applied.
    pub steps: Vec<AuditStep>,
    /// How long the computation took in microseconds.
    pub duration_us: u64,
}

/// The result of an audited estimate.
///
/// Carries the computed [`BillTotals`] together with the inputs that are
/// passed through untouched and a step-by-step [`AuditTrace`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillEstimate {
    /// Unique identifier for this estimate.
    pub estimate_id: Uuid,
    /// When the estimate was computed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that produced the estimate.
    pub engine_version: String,
    /// The staff count the grand total was multiplied by.
    pub staff_count: u32,
    /// Days in the billing month. Informational only.
    pub month_days: u32,
    /// The computed totals.
    pub totals: BillTotals,
    /// The derivation record.
    pub audit_trace: AuditTrace,
}
