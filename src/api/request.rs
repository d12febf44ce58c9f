//! Request types for the bill estimation API.

use serde::{Deserialize, Serialize};

use crate::models::{BillTerms, SalaryComponents};

/// Request body for the `/estimate` endpoint.
///
/// Terms are taken from `terms` when present, otherwise from the named
/// `preset`, otherwise from the configured default preset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateRequest {
    /// Per-head salary breakdown.
    #[serde(default)]
    pub components: SalaryComponents,
    /// Explicit percentage terms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<BillTerms>,
    /// Name of a configured term preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    /// Number of heads ("nos").
    pub staff_count: i64,
    /// Days in the billing month.
    pub month_days: u32,
}

/// Query string filter by client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientFilter {
    /// Only return entries for this client.
    pub client_id: Option<String>,
}
