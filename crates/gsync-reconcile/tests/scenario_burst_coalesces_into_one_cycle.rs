use gsync_reconcile::{build_request, is_monitored, Admission, ReconcileState};
use gsync_schemas::{fields, DocKind, TransactionRecord};
use serde_json::{json, Value};

#[test]
fn burst_of_triggers_builds_a_single_request_from_latest_values() {
    let mut state = ReconcileState::new();
    let mut rec = TransactionRecord::new(DocKind::SalesInvoice)
        .with(fields::COMPANY, "ACME India")
        .with(fields::CUSTOMER, "Globex");

    let edits: [(&str, Value); 3] = [
        (fields::TAX_CATEGORY, json!("In-State")),
        (fields::CUSTOMER_ADDRESS, json!("Globex-Billing")),
        (fields::TAX_CATEGORY, json!("Out-State")),
    ];

    let mut started = 0;
    let mut company = None;
    for (field, value) in edits {
        assert!(is_monitored(rec.kind, field));
        rec.set(field, value);
        match state.admit(&rec, field) {
            Admission::Started { company: c } => {
                started += 1;
                company = Some(c);
            }
            Admission::Coalesced => {}
            Admission::Skipped(reason) => panic!("unexpected skip: {reason:?}"),
        }
    }
    assert_eq!(started, 1);
    assert_eq!(state.coalesced_triggers(), 2);

    let ticket = state.take_cycle(company.unwrap());
    let req = build_request(&rec, ticket);
    assert!(req.update_place_of_supply);
    assert_eq!(req.party_details.get(fields::TAX_CATEGORY), Some(&json!("Out-State")));
    assert_eq!(
        req.party_details.get(fields::CUSTOMER_ADDRESS),
        Some(&json!("Globex-Billing"))
    );
}

#[test]
fn trigger_after_cycle_taken_starts_a_new_cycle() {
    let mut state = ReconcileState::new();
    let rec = TransactionRecord::new(DocKind::PurchaseReceipt)
        .with(fields::COMPANY, "ACME India")
        .with(fields::SUPPLIER, "Initech");

    assert!(matches!(state.admit(&rec, fields::TAX_CATEGORY), Admission::Started { .. }));
    state.take_cycle("ACME India".into());
    assert!(matches!(state.admit(&rec, fields::SUPPLIER_ADDRESS), Admission::Started { .. }));
}
