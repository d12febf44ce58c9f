//! Salary component breakdown for a single head.
//!
//! This module defines [`SalaryComponents`], the fixed set of monthly
//! earning components that make up a person's gross salary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The monthly earning components of one employee, per head.
///
/// The set of components is closed: every field is a named, non-negative
/// amount defaulting to zero, so the gross salary is always the sum of
/// exactly these sixteen values. Unknown keys are rejected when
/// deserializing.
///
/// Amounts are 28-digit decimals. A breakdown whose exact sum would need
/// more significant digits than that is rejected by the estimator rather
/// than summed with lost precision.
///
/// # Example
///
/// ```
/// use axis_billing::models::SalaryComponents;
/// use rust_decimal::Decimal;
///
/// let components = SalaryComponents {
///     basic: Decimal::from(10000),
///     da: Decimal::from(2000),
///     hra: Decimal::from(3000),
///     ..Default::default()
/// };
/// let gross: Decimal = components.entries().iter().map(|(_, v)| *v).sum();
/// assert_eq!(gross, Decimal::from(15000));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SalaryComponents {
    /// Basic pay.
    pub basic: Decimal,
    /// Dearness allowance.
    pub da: Decimal,
    /// House rent allowance.
    pub hra: Decimal,
    /// Conveyance allowance.
    pub conveyance: Decimal,
    /// Washing allowance.
    pub washing: Decimal,
    /// Uniform allowance.
    pub uniform: Decimal,
    /// Special allowance.
    pub special_allowance: Decimal,
    /// Education allowance.
    pub education_allowance: Decimal,
    /// Medical allowance.
    pub medical_allowance: Decimal,
    /// Leave allowance paid as part of salary.
    pub leave_allowance: Decimal,
    /// Bonus allowance paid as part of salary.
    pub bonus_allowance: Decimal,
    /// Gratuity allowance paid as part of salary.
    pub gratuity_allowance: Decimal,
    /// Any other earning.
    pub other: Decimal,
    /// Room rent.
    pub room_rent: Decimal,
    /// National-holiday allowance.
    pub nh: Decimal,
    /// Relieving charge.
    pub relieving_charge: Decimal,
}

impl SalaryComponents {
    /// Returns every component paired with its field name, in declaration order.
    pub fn entries(&self) -> [(&'static str, Decimal); 16] {
        [
            ("basic", self.basic),
            ("da", self.da),
            ("hra", self.hra),
            ("conveyance", self.conveyance),
            ("washing", self.washing),
            ("uniform", self.uniform),
            ("special_allowance", self.special_allowance),
            ("education_allowance", self.education_allowance),
            ("medical_allowance", self.medical_allowance),
            ("leave_allowance", self.leave_allowance),
            ("bonus_allowance", self.bonus_allowance),
            ("gratuity_allowance", self.gratuity_allowance),
            ("other", self.other),
            ("room_rent", self.room_rent),
            ("nh", self.nh),
            ("relieving_charge", self.relieving_charge),
        ]
    }
}
