//! Bill totals computation.
//!
//! This module derives the employer contributions, service charge and
//! billable totals from a salary breakdown and a set of percentage terms.
//!
//! The derivation order is fixed and every percentage is rounded to a whole
//! unit as soon as it is applied:
//!
//! 1. gross salary = sum of all components (unrounded)
//! 2. EPF on basic + DA
//! 3. ESI on gross salary
//! 4. bonus, leave, gratuity, holiday on basic
//! 5. subtotal = gross + all of the above
//! 6. service charge on the subtotal
//! 7. total per head = subtotal + service charge
//! 8. grand total = total per head x staff count

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EstimatorError, EstimatorResult};
use crate::models::{BillTerms, BillTotals, SalaryComponents};

use super::rounding::apply_percent;
use super::validation::{validate_components, validate_staff_count, validate_terms};

/// One percentage applied to one basis.
#[derive(Debug, Clone)]
pub(crate) struct PercentLine {
    pub rule_id: &'static str,
    pub rule_name: &'static str,
    pub term: &'static str,
    pub basis_label: &'static str,
    pub basis: Decimal,
    pub percent: Decimal,
    pub amount: Decimal,
}

impl PercentLine {
    fn apply(
        rule_id: &'static str,
        rule_name: &'static str,
        term: &'static str,
        basis_label: &'static str,
        basis: Decimal,
        percent: Decimal,
    ) -> EstimatorResult<Self> {
        let amount = apply_percent(basis, percent, &format!("terms.{}", term))?;
        Ok(Self {
            rule_id,
            rule_name,
            term,
            basis_label,
            basis,
            percent,
            amount,
        })
    }
}

/// Every intermediate value of one computation.
#[derive(Debug, Clone)]
pub(crate) struct Derivation {
    pub staff_count: u32,
    pub gross_salary: Decimal,
    /// EPF, ESI, bonus, leave, gratuity and holiday, in that order.
    pub contributions: [PercentLine; 6],
    pub sub_total: Decimal,
    pub service_charge: PercentLine,
    pub total_per_head: Decimal,
    pub grand_total: Decimal,
}

impl Derivation {
    pub fn totals(&self) -> BillTotals {
        let [epf, esi, bonus, leave, gratuity, holiday] = &self.contributions;
        BillTotals {
            gross_salary: self.gross_salary,
            epf_amount: epf.amount,
            esi_amount: esi.amount,
            bonus_amount: bonus.amount,
            leave_amount: leave.amount,
            gratuity_amount: gratuity.amount,
            holiday_amount: holiday.amount,
            service_charge_amount: self.service_charge.amount,
            total_per_head: self.total_per_head,
            grand_total: self.grand_total,
        }
    }
}

/// Adds two amounts, failing when the exact sum cannot be represented.
///
/// `Decimal` silently drops fractional digits once a sum needs more than 28
/// significant digits, which shows up as a scale below that of either
/// operand.
fn checked_add(a: Decimal, b: Decimal, field: &str) -> EstimatorResult<Decimal> {
    let sum = a.checked_add(b).ok_or_else(|| {
        EstimatorError::invalid_input(field, "sum exceeds the representable range")
    })?;
    if sum.scale() < a.scale().max(b.scale()) {
        return Err(EstimatorError::invalid_input(
            field,
            format!("{} + {} cannot be represented exactly", a, b),
        ));
    }
    Ok(sum)
}

/// Validates the inputs and runs the full derivation.
pub(crate) fn derive(
    components: &SalaryComponents,
    terms: &BillTerms,
    staff_count: i64,
) -> EstimatorResult<Derivation> {
    let staff_count = validate_staff_count(staff_count)?;
    validate_components(components)?;
    validate_terms(terms)?;

    let gross_salary = components
        .entries()
        .iter()
        .try_fold(Decimal::ZERO, |acc, (_, amount)| {
            checked_add(acc, *amount, "components")
        })?;
    let epf_basis = checked_add(components.basic, components.da, "components.da")?;
    let basic = components.basic;

    let contributions = [
        PercentLine::apply(
            "epf",
            "Employer EPF",
            "epf_percent",
            "basic + da",
            epf_basis,
            terms.epf_percent,
        )?,
        PercentLine::apply(
            "esi",
            "Employer ESI",
            "esi_percent",
            "gross salary",
            gross_salary,
            terms.esi_percent,
        )?,
        PercentLine::apply(
            "bonus",
            "Statutory Bonus",
            "bonus_percent",
            "basic",
            basic,
            terms.bonus_percent,
        )?,
        PercentLine::apply(
            "leave",
            "Leave Provision",
            "leave_percent",
            "basic",
            basic,
            terms.leave_percent,
        )?,
        PercentLine::apply(
            "gratuity",
            "Gratuity Provision",
            "gratuity_percent",
            "basic",
            basic,
            terms.gratuity_percent,
        )?,
        PercentLine::apply(
            "holiday",
            "Holiday Allowance",
            "holiday_percent",
            "basic",
            basic,
            terms.holiday_percent,
        )?,
    ];

    let sub_total = contributions.iter().try_fold(gross_salary, |acc, line| {
        checked_add(acc, line.amount, "sub_total")
    })?;

    let service_charge = PercentLine::apply(
        "service_charge",
        "Service Charge",
        "service_charge_percent",
        "sub total",
        sub_total,
        terms.service_charge_percent,
    )?;

    let total_per_head = checked_add(sub_total, service_charge.amount, "total_per_head")?;
    let grand_total = total_per_head
        .checked_mul(Decimal::from(staff_count))
        .ok_or_else(|| {
            EstimatorError::invalid_input(
                "staff_count",
                format!(
                    "{} heads at {} exceeds the representable range",
                    staff_count, total_per_head
                ),
            )
        })?;

    Ok(Derivation {
        staff_count,
        gross_salary,
        contributions,
        sub_total,
        service_charge,
        total_per_head,
        grand_total,
    })
}

/// Computes the bill totals for a salary breakdown, terms and staff count.
///
/// The computation is pure: the same inputs always give the same totals,
/// and nothing is returned unless every input is valid.
///
/// # Arguments
///
/// * `components` - The per-head monthly salary breakdown
/// * `terms` - The percentage terms to apply
/// * `staff_count` - The number of heads being billed
///
/// # Returns
///
/// Returns the derived [`BillTotals`], or `InvalidInput` if:
/// - `staff_count` is zero or negative
/// - any component or term is negative
/// - an intermediate amount exceeds the decimal range
///
/// # Examples
///
/// ```
/// use axis_billing::calculation::compute_totals;
/// use axis_billing::models::{BillTerms, SalaryComponents};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let components = SalaryComponents {
///     basic: dec("10000"),
///     da: dec("2000"),
///     hra: dec("3000"),
///     ..Default::default()
/// };
/// let terms = BillTerms {
///     epf_percent: dec("13"),
///     esi_percent: dec("3.25"),
///     bonus_percent: dec("8.33"),
///     leave_percent: dec("5"),
///     gratuity_percent: dec("4.81"),
///     holiday_percent: dec("0"),
///     service_charge_percent: dec("10"),
/// };
///
/// let totals = compute_totals(&components, &terms, 2)?;
/// assert_eq!(totals.total_per_head, dec("20748"));
/// assert_eq!(totals.grand_total, dec("41496"));
/// # Ok::<(), axis_billing::error::EstimatorError>(())
/// ```
pub fn compute_totals(
    components: &SalaryComponents,
    terms: &BillTerms,
    staff_count: i64,
) -> EstimatorResult<BillTotals> {
    let totals = derive(components, terms, staff_count)?.totals();
    debug!(
        staff_count,
        gross_salary = %totals.gross_salary,
        total_per_head = %totals.total_per_head,
        grand_total = %totals.grand_total,
        "Computed bill totals"
    );
    Ok(totals)
}
