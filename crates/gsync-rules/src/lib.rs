//! gsync-rules
//!
//! Derived-field rules evaluated on field change:
//! - overseas / SEZ gate
//! - e-commerce supply type
//! - invoice-numbering banner eligibility
//! - GST transporter id format
//!
//! Pure, synchronous logic. No IO, no caching.

mod banner;
mod ecommerce;
mod overseas;
mod transporter;

pub use banner::{
    invoice_no_banner, is_invoice_no_validation_required, Headline, HeadlineColor, HeadlineLink,
    DOCUMENT_NAME_DOCS_URL,
};
pub use ecommerce::{
    ecommerce_supply_type, SupplyTypeUpdate, COLLECT_TAX_LABEL, REVERSE_CHARGE_LABEL,
};
pub use overseas::{check_overseas_gate, is_overseas_transaction};
pub use transporter::{gstin_check_char, validate_transporter_id};
