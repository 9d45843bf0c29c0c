use gsync_schemas::{fields, GstError, GstSettings, TransactionRecord};

/// `true` when the record is an SEZ or export transaction.
///
/// Customer-facing kinds only count as exports when the place of supply is
/// outside the country; other kinds treat any Overseas party as foreign.
pub fn is_overseas_transaction(record: &TransactionRecord) -> bool {
    match record.str(fields::GST_CATEGORY) {
        Some("SEZ") => true,
        Some("Overseas") if record.kind.is_customer_facing() => {
            record.str(fields::PLACE_OF_SUPPLY) == Some(fields::PLACE_OF_SUPPLY_OTHER_COUNTRIES)
        }
        Some("Overseas") => true,
        _ => false,
    }
}

/// Gate for `gst_category` changes: SEZ / overseas transactions require the
/// feature to be switched on.
pub fn check_overseas_gate(
    record: &TransactionRecord,
    settings: &GstSettings,
) -> Result<(), GstError> {
    if !is_overseas_transaction(record) || settings.enable_overseas_transactions {
        return Ok(());
    }
    Err(GstError::ConfigurationRequired {
        message: "Please enable SEZ / Overseas transactions in GST Settings first".to_string(),
    })
}
