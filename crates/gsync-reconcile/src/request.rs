use gsync_schemas::{fields, DocKind, FieldMap, KindClass, PartyType, TransactionRecord};
use serde::Serialize;
use serde_json::Value;

use crate::CycleTicket;

const COMMON_FIELDS: &[&str] = &[
    fields::TAX_CATEGORY,
    fields::GST_CATEGORY,
    fields::COMPANY_GSTIN,
    fields::PLACE_OF_SUPPLY,
    fields::IS_REVERSE_CHARGE,
];

const CUSTOMER_FIELDS: &[&str] = &[
    fields::CUSTOMER_ADDRESS,
    fields::SHIPPING_ADDRESS_NAME,
    fields::BILLING_ADDRESS_GSTIN,
    fields::IS_EXPORT_WITH_GST,
];

const STOCK_ENTRY_FIELDS: &[&str] = &[
    fields::BILL_FROM_GSTIN,
    fields::BILL_TO_GSTIN,
    fields::BILL_FROM_ADDRESS,
    fields::BILL_TO_ADDRESS,
];

const SUPPLIER_FIELDS: &[&str] = &[fields::SUPPLIER_ADDRESS, fields::SUPPLIER_GSTIN];

/// One outbound reconciliation call. Built fresh per cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct ReconcileRequest {
    pub kind: DocKind,
    pub company: String,
    pub update_place_of_supply: bool,
    pub party_details: FieldMap,
}

/// Wire body of `get_gst_details`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GstDetailsArgs {
    pub doctype: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_place_of_supply: Option<u8>,
    /// JSON-encoded map, as the host expects.
    pub party_details: String,
}

impl ReconcileRequest {
    pub fn to_args(&self) -> serde_json::Result<GstDetailsArgs> {
        Ok(GstDetailsArgs {
            doctype: self.kind.as_str().to_string(),
            company: self.company.clone(),
            update_place_of_supply: self.update_place_of_supply.then_some(1),
            party_details: serde_json::to_string(&self.party_details)?,
        })
    }
}

/// Material Transfer / Material Issue that is not a return: both sides share
/// the company's GSTIN, so no party is needed.
pub fn is_same_gstin_stock_entry(record: &TransactionRecord) -> bool {
    if record.kind != DocKind::StockEntry {
        return false;
    }
    let outward = matches!(
        record.str(fields::PURPOSE),
        Some(fields::PURPOSE_MATERIAL_TRANSFER) | Some(fields::PURPOSE_MATERIAL_ISSUE)
    );
    outward && !record.flag(fields::IS_RETURN)
}

pub fn is_inward_stock_entry(record: &TransactionRecord) -> bool {
    record.kind == DocKind::StockEntry
        && record.str(fields::PURPOSE) == Some(fields::PURPOSE_MATERIAL_TRANSFER)
        && record.flag(fields::IS_RETURN)
}

fn copy_present(record: &TransactionRecord, names: &[&str], out: &mut FieldMap) {
    for name in names {
        if let Some(v) = record.get(name) {
            out.insert((*name).to_string(), v.clone());
        }
    }
}

/// Build the request from the record as it stands now.
pub fn build_request(record: &TransactionRecord, ticket: CycleTicket) -> ReconcileRequest {
    let kind = record.kind;
    let mut details = FieldMap::new();

    let party_type = kind.party_type();
    let include_party = match kind {
        DocKind::Quotation => record.str(fields::PARTY_TYPE) == Some(PartyType::Customer.as_str()),
        _ => true,
    };
    if include_party {
        if let Some(v) = record.get(kind.party_fieldname()) {
            details.insert(party_type.key().to_string(), v.clone());
        }
    }

    copy_present(record, COMMON_FIELDS, &mut details);
    match kind.class() {
        KindClass::CustomerFacing => copy_present(record, CUSTOMER_FIELDS, &mut details),
        KindClass::InternalTransfer => {
            copy_present(record, STOCK_ENTRY_FIELDS, &mut details);
            details.insert(
                "is_outward_stock_entry".into(),
                Value::Bool(is_same_gstin_stock_entry(record)),
            );
            details.insert(
                "is_inward_stock_entry".into(),
                Value::Bool(is_inward_stock_entry(record)),
            );
        }
        KindClass::Subcontracting | KindClass::SupplierFacing => {
            copy_present(record, SUPPLIER_FIELDS, &mut details)
        }
    }

    ReconcileRequest {
        kind,
        company: ticket.company,
        update_place_of_supply: ticket.update_place_of_supply,
        party_details: details,
    }
}

/// One outbound call for a subcontracting supplier's party details.
#[derive(Clone, Debug, PartialEq)]
pub struct PartyDetailsRequest {
    /// Field the returned GSTIN belongs in.
    pub gstin_field: &'static str,
    pub party_details: FieldMap,
    pub posting_date: Option<String>,
}

/// Wire body of `get_party_details_for_subcontracting`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PartyDetailsArgs {
    pub party_details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posting_date: Option<String>,
}

impl PartyDetailsRequest {
    pub fn to_args(&self) -> serde_json::Result<PartyDetailsArgs> {
        Ok(PartyDetailsArgs {
            party_details: serde_json::to_string(&self.party_details)?,
            posting_date: self.posting_date.clone(),
        })
    }
}

/// Request for the supplier's address and GSTIN on a subcontracting
/// movement. Built for every supplier change; a cleared supplier is sent as
/// is so the host can clear the details it filled before.
pub fn build_party_details_request(record: &TransactionRecord) -> PartyDetailsRequest {
    let supplier = record.get(fields::SUPPLIER).cloned().unwrap_or(Value::Null);

    let inward = is_inward_stock_entry(record);
    let gstin_field = match (record.kind, inward) {
        (DocKind::StockEntry, true) => fields::BILL_TO_GSTIN,
        (DocKind::StockEntry, false) => fields::BILL_FROM_GSTIN,
        _ => fields::COMPANY_GSTIN,
    };

    let mut details = FieldMap::new();
    details.insert(
        gstin_field.to_string(),
        record.get(gstin_field).cloned().unwrap_or(Value::Null),
    );
    details.insert(fields::SUPPLIER.to_string(), supplier);
    details.insert("is_inward_stock_entry".into(), Value::Bool(inward));

    let posting_date = record
        .str(fields::POSTING_DATE)
        .or_else(|| record.str(fields::TRANSACTION_DATE))
        .map(str::to_string);

    PartyDetailsRequest {
        gstin_field,
        party_details: details,
        posting_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ticket(pos: bool) -> CycleTicket {
        CycleTicket {
            company: "ACME India".into(),
            update_place_of_supply: pos,
        }
    }

    #[test]
    fn sales_invoice_payload() {
        let rec = TransactionRecord::new(DocKind::SalesInvoice)
            .with(fields::COMPANY, "ACME India")
            .with(fields::CUSTOMER, "Globex")
            .with(fields::TAX_CATEGORY, "In-State")
            .with(fields::BILLING_ADDRESS_GSTIN, "27AAPFU0939F1ZV")
            .with(fields::SUPPLIER_ADDRESS, "ignored");
        let req = build_request(&rec, ticket(false));
        assert_eq!(req.company, "ACME India");
        assert_eq!(req.party_details.get("customer"), Some(&json!("Globex")));
        assert_eq!(req.party_details.get(fields::TAX_CATEGORY), Some(&json!("In-State")));
        assert!(req.party_details.get(fields::SUPPLIER_ADDRESS).is_none());
        // absent fields stay absent
        assert!(req.party_details.get(fields::PLACE_OF_SUPPLY).is_none());
    }

    #[test]
    fn explicit_null_is_sent() {
        let rec = TransactionRecord::new(DocKind::PurchaseInvoice)
            .with(fields::SUPPLIER, "Initech")
            .with(fields::SUPPLIER_GSTIN, Value::Null);
        let req = build_request(&rec, ticket(false));
        assert_eq!(req.party_details.get(fields::SUPPLIER_GSTIN), Some(&Value::Null));
        assert_eq!(req.party_details.get("supplier"), Some(&json!("Initech")));
    }

    #[test]
    fn quotation_party_only_for_customers() {
        let lead = TransactionRecord::new(DocKind::Quotation)
            .with(fields::PARTY_NAME, "CRM-LEAD-0001")
            .with(fields::PARTY_TYPE, "Lead");
        assert!(build_request(&lead, ticket(false)).party_details.get("customer").is_none());

        let customer = TransactionRecord::new(DocKind::Quotation)
            .with(fields::PARTY_NAME, "Globex")
            .with(fields::PARTY_TYPE, "Customer");
        assert_eq!(
            build_request(&customer, ticket(false)).party_details.get("customer"),
            Some(&json!("Globex"))
        );
    }

    #[test]
    fn stock_entry_carries_direction_flags() {
        let rec = TransactionRecord::new(DocKind::StockEntry)
            .with(fields::PURPOSE, fields::PURPOSE_MATERIAL_TRANSFER)
            .with(fields::IS_RETURN, 1)
            .with(fields::BILL_TO_ADDRESS, "Plant 2");
        let req = build_request(&rec, ticket(false));
        assert_eq!(req.party_details.get("is_outward_stock_entry"), Some(&json!(false)));
        assert_eq!(req.party_details.get("is_inward_stock_entry"), Some(&json!(true)));
        assert_eq!(req.party_details.get(fields::BILL_TO_ADDRESS), Some(&json!("Plant 2")));
    }

    #[test]
    fn wire_args_encode_party_details_and_flag() {
        let rec = TransactionRecord::new(DocKind::PurchaseOrder)
            .with(fields::SUPPLIER, "Initech")
            .with(fields::TAX_CATEGORY, "Out-State");
        let args = build_request(&rec, ticket(true)).to_args().unwrap();
        assert_eq!(args.doctype, "Purchase Order");
        assert_eq!(args.update_place_of_supply, Some(1));
        let decoded: Value = serde_json::from_str(&args.party_details).unwrap();
        assert_eq!(decoded, json!({"supplier": "Initech", "tax_category": "Out-State"}));

        let body = serde_json::to_value(build_request(&rec, ticket(false)).to_args().unwrap()).unwrap();
        assert!(body.get("update_place_of_supply").is_none());
    }

    #[test]
    fn party_details_request_field_choice() {
        let order = TransactionRecord::new(DocKind::SubcontractingOrder)
            .with(fields::SUPPLIER, "Initech")
            .with(fields::COMPANY_GSTIN, "27AAPFU0939F1ZV")
            .with(fields::TRANSACTION_DATE, "2024-04-01");
        let req = build_party_details_request(&order);
        assert_eq!(req.gstin_field, fields::COMPANY_GSTIN);
        assert_eq!(req.posting_date.as_deref(), Some("2024-04-01"));
        assert_eq!(req.party_details.get("is_inward_stock_entry"), Some(&json!(false)));

        let ret = TransactionRecord::new(DocKind::StockEntry)
            .with(fields::SUPPLIER, "Initech")
            .with(fields::PURPOSE, fields::PURPOSE_MATERIAL_TRANSFER)
            .with(fields::IS_RETURN, 1)
            .with(fields::POSTING_DATE, "2024-05-01");
        let req = build_party_details_request(&ret);
        assert_eq!(req.gstin_field, fields::BILL_TO_GSTIN);
        assert_eq!(req.party_details.get(fields::BILL_TO_GSTIN), Some(&Value::Null));
        assert_eq!(req.party_details.get("is_inward_stock_entry"), Some(&json!(true)));
    }

    #[test]
    fn party_details_request_carries_cleared_supplier() {
        let rec = TransactionRecord::new(DocKind::StockEntry)
            .with(fields::SUPPLIER, "")
            .with(fields::BILL_FROM_GSTIN, "27AAPFU0939F1ZV");
        let req = build_party_details_request(&rec);
        assert_eq!(req.party_details.get(fields::SUPPLIER), Some(&json!("")));
        assert_eq!(
            req.party_details.get(fields::BILL_FROM_GSTIN),
            Some(&json!("27AAPFU0939F1ZV"))
        );
        assert_eq!(req.posting_date, None);

        let bare = TransactionRecord::new(DocKind::SubcontractingOrder);
        let req = build_party_details_request(&bare);
        assert_eq!(req.party_details.get(fields::SUPPLIER), Some(&Value::Null));
    }
}
