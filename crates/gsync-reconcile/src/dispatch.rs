use gsync_schemas::{fields, DocKind, KindClass};

const CUSTOMER_FACING: &[&str] = &[
    fields::TAX_CATEGORY,
    fields::COMPANY_GSTIN,
    fields::PLACE_OF_SUPPLY,
    fields::IS_REVERSE_CHARGE,
    // addresses rather than GSTINs so one address change fires once
    fields::CUSTOMER_ADDRESS,
    fields::SHIPPING_ADDRESS_NAME,
    fields::IS_EXPORT_WITH_GST,
];

const INTERNAL_TRANSFER: &[&str] = &[
    fields::TAX_CATEGORY,
    fields::COMPANY_GSTIN,
    fields::PLACE_OF_SUPPLY,
    fields::IS_REVERSE_CHARGE,
    fields::BILL_FROM_ADDRESS,
    fields::BILL_TO_ADDRESS,
];

const SUBCONTRACTING: &[&str] = &[
    fields::TAX_CATEGORY,
    fields::COMPANY_GSTIN,
    fields::PLACE_OF_SUPPLY,
    fields::IS_REVERSE_CHARGE,
    fields::SUPPLIER_GSTIN,
];

const SUPPLIER_FACING: &[&str] = &[
    fields::TAX_CATEGORY,
    fields::COMPANY_GSTIN,
    fields::PLACE_OF_SUPPLY,
    fields::IS_REVERSE_CHARGE,
    fields::SUPPLIER_ADDRESS,
];

/// Triggers after which the host must recompute the place of supply.
const PLACE_OF_SUPPLY_TRIGGERS: &[&str] = &[
    fields::COMPANY_GSTIN,
    fields::BILL_FROM_GSTIN,
    fields::BILL_TO_ADDRESS,
    fields::CUSTOMER_ADDRESS,
    fields::SHIPPING_ADDRESS_NAME,
    fields::SUPPLIER_ADDRESS,
];

/// Fields whose change schedules a reconciliation for `kind`.
pub fn monitored_fields(kind: DocKind) -> &'static [&'static str] {
    match kind.class() {
        KindClass::CustomerFacing => CUSTOMER_FACING,
        KindClass::InternalTransfer => INTERNAL_TRANSFER,
        KindClass::Subcontracting => SUBCONTRACTING,
        KindClass::SupplierFacing => SUPPLIER_FACING,
    }
}

pub fn is_monitored(kind: DocKind, field: &str) -> bool {
    monitored_fields(kind).contains(&field)
}

pub fn updates_place_of_supply(trigger: &str) -> bool {
    PLACE_OF_SUPPLY_TRIGGERS.contains(&trigger)
}
