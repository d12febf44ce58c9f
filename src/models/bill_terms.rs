//! Statutory and contractual percentage terms.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The percentage terms applied when deriving employer contributions.
///
/// Each percentage is "percent of basis" and is applied independently of the
/// others. Only the service charge is applied to a basis that already
/// includes the other derived amounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BillTerms {
    /// Employer EPF contribution, applied to basic + DA.
    pub epf_percent: Decimal,
    /// Employer ESI contribution, applied to gross salary.
    pub esi_percent: Decimal,
    /// Statutory bonus, applied to basic.
    pub bonus_percent: Decimal,
    /// Leave provision, applied to basic.
    pub leave_percent: Decimal,
    /// Gratuity provision, applied to basic.
    pub gratuity_percent: Decimal,
    /// Holiday allowance, applied to basic.
    pub holiday_percent: Decimal,
    /// Service charge, applied to the subtotal of salary and contributions.
    pub service_charge_percent: Decimal,
}

impl BillTerms {
    /// Returns every term paired with its field name, in declaration order.
    pub fn entries(&self) -> [(&'static str, Decimal); 7] {
        [
            ("epf_percent", self.epf_percent),
            ("esi_percent", self.esi_percent),
            ("bonus_percent", self.bonus_percent),
            ("leave_percent", self.leave_percent),
            ("gratuity_percent", self.gratuity_percent),
            ("holiday_percent", self.holiday_percent),
            ("service_charge_percent", self.service_charge_percent),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_partial_terms_deserialize_with_zero_defaults() {
        let terms: BillTerms =
            serde_json::from_str(r#"{ "epf_percent": 13, "esi_percent": "3.25" }"#).unwrap();
        assert_eq!(terms.epf_percent, Decimal::from(13));
        assert_eq!(terms.esi_percent, Decimal::from_str("3.25").unwrap());
        assert_eq!(terms.service_charge_percent, Decimal::ZERO);
    }

    #[test]
    fn test_entries_names_every_term() {
        let names: Vec<&str> = BillTerms::default()
            .entries()
            .iter()
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(names.len(), 7);
        assert!(names.contains(&"service_charge_percent"));
    }

    #[test]
    fn test_unknown_term_is_rejected() {
        let err = serde_json::from_str::<BillTerms>(r#"{ "epf": 13 }"#).unwrap_err();
        assert!(err.to_string().contains("epf"));
    }
}
