//! Field names as stored on the host record.

pub const COMPANY: &str = "company";
pub const CUSTOMER: &str = "customer";
pub const SUPPLIER: &str = "supplier";
pub const PARTY_NAME: &str = "party_name";
pub const PARTY_TYPE: &str = "party_type";

pub const TAX_CATEGORY: &str = "tax_category";
pub const GST_CATEGORY: &str = "gst_category";
pub const COMPANY_GSTIN: &str = "company_gstin";
pub const PLACE_OF_SUPPLY: &str = "place_of_supply";
pub const IS_REVERSE_CHARGE: &str = "is_reverse_charge";
pub const IS_EXPORT_WITH_GST: &str = "is_export_with_gst";

pub const CUSTOMER_ADDRESS: &str = "customer_address";
pub const SHIPPING_ADDRESS_NAME: &str = "shipping_address_name";
pub const BILLING_ADDRESS_GSTIN: &str = "billing_address_gstin";

pub const SUPPLIER_ADDRESS: &str = "supplier_address";
pub const SUPPLIER_GSTIN: &str = "supplier_gstin";

pub const BILL_FROM_ADDRESS: &str = "bill_from_address";
pub const BILL_TO_ADDRESS: &str = "bill_to_address";
pub const BILL_FROM_GSTIN: &str = "bill_from_gstin";
pub const BILL_TO_GSTIN: &str = "bill_to_gstin";

pub const PURPOSE: &str = "purpose";
pub const IS_RETURN: &str = "is_return";

pub const POSTING_DATE: &str = "posting_date";
pub const TRANSACTION_DATE: &str = "transaction_date";

pub const ECOMMERCE_GSTIN: &str = "ecommerce_gstin";
pub const ECOMMERCE_SUPPLY_TYPE: &str = "ecommerce_supply_type";
pub const GST_TRANSPORTER_ID: &str = "gst_transporter_id";
pub const PORT_CODE: &str = "port_code";

/// Stock Entry purposes that matter for GST.
pub const PURPOSE_MATERIAL_TRANSFER: &str = "Material Transfer";
pub const PURPOSE_MATERIAL_ISSUE: &str = "Material Issue";

/// Place of supply used for exports.
pub const PLACE_OF_SUPPLY_OTHER_COUNTRIES: &str = "96-Other Countries";

/// Human label for a field, as shown in user-facing messages.
pub fn label(fieldname: &str) -> String {
    match fieldname {
        BILLING_ADDRESS_GSTIN => "Billing Address GSTIN".to_string(),
        SUPPLIER_GSTIN => "Supplier GSTIN".to_string(),
        COMPANY_GSTIN => "Company GSTIN".to_string(),
        BILL_FROM_GSTIN => "Bill From GSTIN".to_string(),
        BILL_TO_GSTIN => "Bill To GSTIN".to_string(),
        ECOMMERCE_GSTIN => "E-commerce GSTIN".to_string(),
        GST_TRANSPORTER_ID => "GST Transporter ID".to_string(),
        TRANSACTION_DATE => "Date".to_string(),
        other => title_case(other),
    }
}

fn title_case(fieldname: &str) -> String {
    fieldname
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
