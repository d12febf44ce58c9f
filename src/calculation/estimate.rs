//! Audited bill estimation.
//!
//! This module wraps the totals computation and records an [`AuditStep`]
//! for every amount it derives, so a bill can be explained line by line.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::error::EstimatorResult;
use crate::models::{AuditStep, AuditTrace, BillEstimate, BillTerms, SalaryComponents};

use super::totals::{derive, Derivation, PercentLine};

fn percent_step(step_number: u32, line: &PercentLine) -> AuditStep {
    let unrounded = line.basis * line.percent / Decimal::ONE_HUNDRED;
    let mut input = serde_json::Map::new();
    input.insert(
        "basis".to_string(),
        serde_json::Value::String(line.basis.normalize().to_string()),
    );
    input.insert(
        line.term.to_string(),
        serde_json::Value::String(line.percent.normalize().to_string()),
    );
    AuditStep {
        step_number,
        rule_id: line.rule_id.to_string(),
        rule_name: line.rule_name.to_string(),
        basis: line.basis_label.to_string(),
        input: serde_json::Value::Object(input),
        output: serde_json::json!({
            "unrounded": unrounded.normalize().to_string(),
            "amount": line.amount.to_string()
        }),
        reasoning: format!(
            "{} {} x {}% = {} -> {}",
            line.basis_label,
            line.basis.normalize(),
            line.percent.normalize(),
            unrounded.normalize(),
            line.amount
        ),
    }
}

fn sum_step(
    step_number: u32,
    rule_id: &str,
    rule_name: &str,
    basis: &str,
    input: serde_json::Value,
    amount: Decimal,
    reasoning: String,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        basis: basis.to_string(),
        input,
        output: serde_json::json!({ "amount": amount.normalize().to_string() }),
        reasoning,
    }
}

fn audit_steps(components: &SalaryComponents, derivation: &Derivation) -> Vec<AuditStep> {
    let mut steps = Vec::with_capacity(11);

    let component_input: serde_json::Map<String, serde_json::Value> = components
        .entries()
        .iter()
        .filter(|(_, amount)| !amount.is_zero())
        .map(|(name, amount)| {
            (
                name.to_string(),
                serde_json::Value::String(amount.normalize().to_string()),
            )
        })
        .collect();
    steps.push(sum_step(
        1,
        "gross_salary",
        "Gross Salary",
        "all components",
        serde_json::Value::Object(component_input),
        derivation.gross_salary,
        format!(
            "Sum of salary components = {}",
            derivation.gross_salary.normalize()
        ),
    ));

    for line in &derivation.contributions {
        let step_number = steps.len() as u32 + 1;
        steps.push(percent_step(step_number, line));
    }

    let contribution_amounts: Vec<String> = derivation
        .contributions
        .iter()
        .map(|line| line.amount.to_string())
        .collect();
    steps.push(sum_step(
        steps.len() as u32 + 1,
        "sub_total",
        "Sub Total",
        "gross salary + contributions",
        serde_json::json!({
            "gross_salary": derivation.gross_salary.normalize().to_string(),
            "contributions": contribution_amounts
        }),
        derivation.sub_total,
        format!(
            "{} + {} = {}",
            derivation.gross_salary.normalize(),
            contribution_amounts.join(" + "),
            derivation.sub_total.normalize()
        ),
    ));

    steps.push(percent_step(
        steps.len() as u32 + 1,
        &derivation.service_charge,
    ));

    steps.push(sum_step(
        steps.len() as u32 + 1,
        "total_per_head",
        "Total Per Head",
        "sub total + service charge",
        serde_json::json!({
            "sub_total": derivation.sub_total.normalize().to_string(),
            "service_charge_amount": derivation.service_charge.amount.to_string()
        }),
        derivation.total_per_head,
        format!(
            "{} + {} = {}",
            derivation.sub_total.normalize(),
            derivation.service_charge.amount,
            derivation.total_per_head.normalize()
        ),
    ));

    steps.push(sum_step(
        steps.len() as u32 + 1,
        "grand_total",
        "Grand Total",
        "total per head x staff count",
        serde_json::json!({
            "total_per_head": derivation.total_per_head.normalize().to_string(),
            "staff_count": derivation.staff_count
        }),
        derivation.grand_total,
        format!(
            "{} x {} = {}",
            derivation.total_per_head.normalize(),
            derivation.staff_count,
            derivation.grand_total.normalize()
        ),
    ));

    steps
}

/// Produces an audited estimate for one billing line.
///
/// The totals are identical to those of
/// [`compute_totals`](super::compute_totals) for the same inputs.
/// `month_days` is carried through untouched and never enters the
/// arithmetic, so any value is accepted here. Saved estimations check it
/// against the calendar in
/// [`EstimationService`](crate::store::EstimationService).
///
/// # Examples
///
/// ```
/// use axis_billing::calculation::estimate;
/// use axis_billing::models::{BillTerms, SalaryComponents};
/// use rust_decimal::Decimal;
///
/// let components = SalaryComponents {
///     basic: Decimal::from(12000),
///     ..Default::default()
/// };
/// let terms = BillTerms {
///     epf_percent: Decimal::from(13),
///     ..Default::default()
/// };
///
/// let result = estimate(&components, &terms, 3, 30)?;
/// assert_eq!(result.totals.epf_amount, Decimal::from(1560));
/// assert_eq!(result.month_days, 30);
/// assert_eq!(result.audit_trace.steps.len(), 11);
/// # Ok::<(), axis_billing::error::EstimatorError>(())
/// ```
pub fn estimate(
    components: &SalaryComponents,
    terms: &BillTerms,
    staff_count: i64,
    month_days: u32,
) -> EstimatorResult<BillEstimate> {
    let start_time = Instant::now();

    let derivation = derive(components, terms, staff_count)?;
    let steps = audit_steps(components, &derivation);
    let totals = derivation.totals();
    let duration_us = start_time.elapsed().as_micros() as u64;

    debug!(
        staff_count = derivation.staff_count,
        month_days,
        grand_total = %totals.grand_total,
        steps = steps.len(),
        duration_us,
        "Produced audited estimate"
    );

    Ok(BillEstimate {
        estimate_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        staff_count: derivation.staff_count,
        month_days,
        totals,
        audit_trace: AuditTrace { steps, duration_us },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::compute_totals;
    use crate::error::EstimatorError;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_components() -> SalaryComponents {
        SalaryComponents {
            basic: dec("10000"),
            da: dec("2000"),
            hra: dec("3000"),
            ..Default::default()
        }
    }

    fn sample_terms() -> BillTerms {
        BillTerms {
            epf_percent: dec("13"),
            esi_percent: dec("3.25"),
            bonus_percent: dec("8.33"),
            leave_percent: dec("5"),
            gratuity_percent: dec("4.81"),
            holiday_percent: dec("0"),
            service_charge_percent: dec("10"),
        }
    }

    #[test]
    fn test_estimate_totals_match_compute_totals() {
        let result = estimate(&sample_components(), &sample_terms(), 2, 30).unwrap();
        let totals = compute_totals(&sample_components(), &sample_terms(), 2).unwrap();
        assert_eq!(result.totals, totals);
        assert_eq!(result.staff_count, 2);
    }

    #[test]
    fn test_month_days_does_not_change_totals() {
        let days_28 = estimate(&sample_components(), &sample_terms(), 2, 28).unwrap();
        let days_31 = estimate(&sample_components(), &sample_terms(), 2, 31).unwrap();
        assert_eq!(days_28.totals, days_31.totals);
        assert_eq!(days_28.month_days, 28);
        assert_eq!(days_31.month_days, 31);
    }

    #[test]
    fn test_month_days_outside_calendar_is_passed_through() {
        let reference = estimate(&sample_components(), &sample_terms(), 2, 30).unwrap();
        for month_days in [0, 45] {
            let result = estimate(&sample_components(), &sample_terms(), 2, month_days).unwrap();
            assert_eq!(result.month_days, month_days);
            assert_eq!(result.totals, reference.totals);
        }
    }

    #[test]
    fn test_invalid_staff_count_is_rejected() {
        let result = estimate(&sample_components(), &sample_terms(), 0, 30);
        assert!(matches!(
            result,
            Err(EstimatorError::InvalidInput { ref field, .. }) if field == "staff_count"
        ));
    }

    #[test]
    fn test_audit_steps_follow_derivation_order() {
        let result = estimate(&sample_components(), &sample_terms(), 2, 30).unwrap();
        let rule_ids: Vec<&str> = result
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            rule_ids,
            vec![
                "gross_salary",
                "epf",
                "esi",
                "bonus",
                "leave",
                "gratuity",
                "holiday",
                "sub_total",
                "service_charge",
                "total_per_head",
                "grand_total",
            ]
        );
        for (i, step) in result.audit_trace.steps.iter().enumerate() {
            assert_eq!(step.step_number, i as u32 + 1);
        }
    }

    #[test]
    fn test_esi_step_records_unrounded_and_rounded_amounts() {
        let result = estimate(&sample_components(), &sample_terms(), 2, 30).unwrap();
        let esi = &result.audit_trace.steps[2];

        assert_eq!(esi.basis, "gross salary");
        assert_eq!(esi.input["basis"].as_str().unwrap(), "15000");
        assert_eq!(esi.input["esi_percent"].as_str().unwrap(), "3.25");
        assert_eq!(esi.output["unrounded"].as_str().unwrap(), "487.5");
        assert_eq!(esi.output["amount"].as_str().unwrap(), "488");
        assert!(esi.reasoning.contains("487.5"));
        assert!(esi.reasoning.contains("488"));
    }

    #[test]
    fn test_epf_step_uses_basic_plus_da_basis() {
        let result = estimate(&sample_components(), &sample_terms(), 2, 30).unwrap();
        let epf = &result.audit_trace.steps[1];

        assert_eq!(epf.basis, "basic + da");
        assert_eq!(epf.input["basis"].as_str().unwrap(), "12000");
        assert_eq!(epf.output["amount"].as_str().unwrap(), "1560");
    }

    #[test]
    fn test_gross_step_lists_non_zero_components() {
        let result = estimate(&sample_components(), &sample_terms(), 2, 30).unwrap();
        let gross = &result.audit_trace.steps[0];
        let input = gross.input.as_object().unwrap();

        assert_eq!(input.len(), 3);
        assert_eq!(input["hra"].as_str().unwrap(), "3000");
        assert_eq!(gross.output["amount"].as_str().unwrap(), "15000");
    }

    #[test]
    fn test_grand_total_step_explains_multiplication() {
        let result = estimate(&sample_components(), &sample_terms(), 2, 30).unwrap();
        let grand = result.audit_trace.steps.last().unwrap();

        assert_eq!(grand.input["staff_count"].as_u64().unwrap(), 2);
        assert_eq!(grand.reasoning, "20748 x 2 = 41496");
    }

    #[test]
    fn test_estimate_records_engine_version() {
        let result = estimate(&sample_components(), &sample_terms(), 1, 30).unwrap();
        assert_eq!(result.engine_version, env!("CARGO_PKG_VERSION"));
    }
}
