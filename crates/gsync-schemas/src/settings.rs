use serde::{Deserialize, Serialize};

/// GST feature flags. Read-only for the lifetime of an editing session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GstSettings {
    pub enable_overseas_transactions: bool,
    pub validate_gstin_status: bool,
    pub enable_sales_through_ecommerce_operators: bool,
    pub enable_e_waybill_from_pi: bool,
    pub enable_e_waybill_from_dn: bool,
    pub enable_e_waybill_from_pr: bool,
}

impl GstSettings {
    /// Every flag off.
    pub fn disabled() -> Self {
        Self::default()
    }
}
