use std::sync::Arc;

use chrono::NaiveDate;
use gsync_runtime::{FormSession, Services};
use gsync_schemas::{
    fields, DocKind, FieldMap, GstSettings, GstinStatus, RegistryEntry, TransactionRecord,
};
use serde_json::Value;

use crate::{CountingLookup, RecordingGstDetails, RecordingPartyDetails};

pub const COMPANY: &str = "ACME India";

pub fn sales_invoice() -> TransactionRecord {
    TransactionRecord::new(DocKind::SalesInvoice)
        .with(fields::COMPANY, COMPANY)
        .with(fields::CUSTOMER, "Globex")
        .with(fields::POSTING_DATE, "2024-04-01")
}

pub fn purchase_invoice() -> TransactionRecord {
    TransactionRecord::new(DocKind::PurchaseInvoice)
        .with(fields::COMPANY, COMPANY)
        .with(fields::SUPPLIER, "Initech")
        .with(fields::POSTING_DATE, "2024-04-01")
}

pub fn stock_entry(purpose: &str, is_return: bool) -> TransactionRecord {
    TransactionRecord::new(DocKind::StockEntry)
        .with(fields::COMPANY, COMPANY)
        .with(fields::PURPOSE, purpose)
        .with(fields::IS_RETURN, i64::from(is_return))
        .with(fields::POSTING_DATE, "2024-04-01")
}

pub fn subcontracting_receipt() -> TransactionRecord {
    TransactionRecord::new(DocKind::SubcontractingReceipt)
        .with(fields::COMPANY, COMPANY)
        .with(fields::COMPANY_GSTIN, "27AAPFU0939F1ZV")
        .with(fields::POSTING_DATE, "2024-04-01")
}

pub fn field_map(pairs: &[(&str, Value)]) -> FieldMap {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

/// Active GSTIN registered on 2020-01-01.
pub fn active_entry(gstin: &str) -> RegistryEntry {
    RegistryEntry::new(gstin, GstinStatus::Active).registered_on(
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
    )
}

/// A session wired to in-memory services.
pub struct Harness {
    pub session: FormSession,
    pub gst_details: Arc<RecordingGstDetails>,
    pub lookup: Arc<CountingLookup>,
    pub party_details: Arc<RecordingPartyDetails>,
}

impl Harness {
    pub fn new(record: TransactionRecord, settings: GstSettings) -> Self {
        Self::with_lookup(record, settings, CountingLookup::new([]))
    }

    /// Reconciliation requests note how many lookups had completed.
    pub fn with_lookup(
        record: TransactionRecord,
        settings: GstSettings,
        lookup: CountingLookup,
    ) -> Self {
        let lookup = Arc::new(lookup);
        let gst_details = Arc::new(RecordingGstDetails::watching(lookup.clone()));
        let party_details = Arc::new(RecordingPartyDetails::new());
        let services = Services {
            gst_details: gst_details.clone(),
            gstin_lookup: lookup.clone(),
            party_details: party_details.clone(),
        };
        Self {
            session: FormSession::new(record, Arc::new(settings), services),
            gst_details,
            lookup,
            party_details,
        }
    }
}
