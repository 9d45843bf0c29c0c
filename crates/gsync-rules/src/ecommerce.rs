use gsync_schemas::{fields, GstSettings, TransactionRecord};

/// Operator is liable to pay tax on the supply.
pub const REVERSE_CHARGE_LABEL: &str = "Liable to pay tax u/s 9(5)";
/// Operator collects tax at source.
pub const COLLECT_TAX_LABEL: &str = "Liable to collect tax u/s 52(TCS)";

/// What to do with `ecommerce_supply_type`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SupplyTypeUpdate {
    /// Feature disabled; leave the field alone.
    Unchanged,
    /// No operator GSTIN; blank the field.
    Clear,
    Set(&'static str),
}

impl SupplyTypeUpdate {
    /// Value to write, if any.
    pub fn value(&self) -> Option<serde_json::Value> {
        match self {
            SupplyTypeUpdate::Unchanged => None,
            SupplyTypeUpdate::Clear => Some(serde_json::Value::String(String::new())),
            SupplyTypeUpdate::Set(label) => Some(serde_json::Value::String((*label).to_string())),
        }
    }
}

/// Recompute the supply type after `ecommerce_gstin` or `is_reverse_charge`
/// changed.
pub fn ecommerce_supply_type(record: &TransactionRecord, settings: &GstSettings) -> SupplyTypeUpdate {
    if !settings.enable_sales_through_ecommerce_operators {
        return SupplyTypeUpdate::Unchanged;
    }
    if record.str(fields::ECOMMERCE_GSTIN).is_none() {
        return SupplyTypeUpdate::Clear;
    }
    if record.flag(fields::IS_REVERSE_CHARGE) {
        SupplyTypeUpdate::Set(REVERSE_CHARGE_LABEL)
    } else {
        SupplyTypeUpdate::Set(COLLECT_TAX_LABEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gsync_schemas::DocKind;

    fn enabled() -> GstSettings {
        GstSettings {
            enable_sales_through_ecommerce_operators: true,
            ..GstSettings::default()
        }
    }

    #[test]
    fn disabled_feature_leaves_field_alone() {
        let rec = TransactionRecord::new(DocKind::SalesInvoice).with(fields::ECOMMERCE_GSTIN, "X");
        assert_eq!(
            ecommerce_supply_type(&rec, &GstSettings::disabled()),
            SupplyTypeUpdate::Unchanged
        );
        assert_eq!(SupplyTypeUpdate::Unchanged.value(), None);
    }

    #[test]
    fn collect_tax_without_reverse_charge() {
        let rec = TransactionRecord::new(DocKind::SalesOrder)
            .with(fields::ECOMMERCE_GSTIN, "X")
            .with(fields::IS_REVERSE_CHARGE, 0);
        assert_eq!(
            ecommerce_supply_type(&rec, &enabled()),
            SupplyTypeUpdate::Set(COLLECT_TAX_LABEL)
        );
    }

    #[test]
    fn missing_operator_gstin_clears() {
        let rec = TransactionRecord::new(DocKind::DeliveryNote).with(fields::IS_REVERSE_CHARGE, 1);
        assert_eq!(ecommerce_supply_type(&rec, &enabled()), SupplyTypeUpdate::Clear);
    }
}
