use gsync_rules::{ecommerce_supply_type, SupplyTypeUpdate, COLLECT_TAX_LABEL, REVERSE_CHARGE_LABEL};
use gsync_schemas::{fields, DocKind, GstSettings, TransactionRecord};
use serde_json::json;

fn enabled() -> GstSettings {
    GstSettings {
        enable_sales_through_ecommerce_operators: true,
        ..GstSettings::default()
    }
}

#[test]
fn reverse_charge_selects_pay_tax_label() {
    let rec = TransactionRecord::new(DocKind::SalesInvoice)
        .with(fields::ECOMMERCE_GSTIN, "X")
        .with(fields::IS_REVERSE_CHARGE, true);
    let update = ecommerce_supply_type(&rec, &enabled());
    assert_eq!(update, SupplyTypeUpdate::Set(REVERSE_CHARGE_LABEL));
    assert_eq!(update.value(), Some(json!("Liable to pay tax u/s 9(5)")));
}

#[test]
fn blank_operator_gstin_clears_supply_type() {
    let rec = TransactionRecord::new(DocKind::SalesInvoice)
        .with(fields::ECOMMERCE_GSTIN, "")
        .with(fields::ECOMMERCE_SUPPLY_TYPE, COLLECT_TAX_LABEL);
    let update = ecommerce_supply_type(&rec, &enabled());
    assert_eq!(update, SupplyTypeUpdate::Clear);
    assert_eq!(update.value(), Some(json!("")));
}
