//! Scenario: writing a reconciliation result back never schedules another
//!
//! # Invariant under test
//! Fields written from a result are routed to the other handlers, but no
//! reconciliation cycle starts from them. An empty result changes nothing.

use gsync_schemas::{fields, GstSettings};
use gsync_testkit::{field_map, sales_invoice, Harness};
use serde_json::json;

#[tokio::test]
async fn monitored_fields_in_result_do_not_retrigger() {
    let h = Harness::new(sales_invoice(), GstSettings::disabled());
    h.gst_details.reply_with(field_map(&[
        (fields::PLACE_OF_SUPPLY, json!("27-Maharashtra")),
        (fields::TAX_CATEGORY, json!("In-State")),
        (fields::IS_REVERSE_CHARGE, json!(0)),
    ]));

    h.session
        .set_value(fields::CUSTOMER_ADDRESS, json!("Globex-Billing"))
        .await
        .unwrap();

    assert_eq!(h.gst_details.calls().len(), 1);
    let rec = h.session.snapshot();
    assert_eq!(rec.get(fields::PLACE_OF_SUPPLY), Some(&json!("27-Maharashtra")));
    assert_eq!(rec.get(fields::TAX_CATEGORY), Some(&json!("In-State")));

    // write-back over: user edits trigger again
    h.session
        .set_value(fields::TAX_CATEGORY, json!("Out-State"))
        .await
        .unwrap();
    assert_eq!(h.gst_details.calls().len(), 2);
}

#[tokio::test]
async fn empty_result_leaves_record_unchanged() {
    let h = Harness::new(sales_invoice(), GstSettings::disabled());
    h.gst_details.reply_with(field_map(&[]));

    h.session
        .set_value(fields::TAX_CATEGORY, json!("In-State"))
        .await
        .unwrap();
    let after_first = h.session.snapshot();

    // no reply queued: "nothing to apply"
    h.session
        .set_value(fields::SHIPPING_ADDRESS_NAME, json!("Globex-Warehouse"))
        .await
        .unwrap();
    let mut expected = after_first.clone();
    expected.set(fields::SHIPPING_ADDRESS_NAME, json!("Globex-Warehouse"));

    assert_eq!(h.session.snapshot(), expected);
    assert_eq!(h.gst_details.calls().len(), 2);
}

#[tokio::test]
async fn result_still_routes_to_other_handlers() {
    let settings = GstSettings {
        enable_sales_through_ecommerce_operators: true,
        ..GstSettings::default()
    };
    let rec = sales_invoice().with(fields::ECOMMERCE_GSTIN, "07AAACE1234F1ZX");
    let h = Harness::new(rec, settings);
    h.gst_details
        .reply_with(field_map(&[(fields::IS_REVERSE_CHARGE, json!(1))]));

    h.session
        .set_value(fields::TAX_CATEGORY, json!("In-State"))
        .await
        .unwrap();

    assert_eq!(h.gst_details.calls().len(), 1);
    assert_eq!(
        h.session.get(fields::ECOMMERCE_SUPPLY_TYPE),
        Some(json!("Liable to pay tax u/s 9(5)"))
    );
}
