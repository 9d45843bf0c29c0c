use anyhow::Result;
use chrono::NaiveDate;
use gsync_reconcile::{PartyDetailsRequest, ReconcileRequest};
use gsync_schemas::{FieldMap, RegistryEntry};

/// Computes the tax-identity fields for a record.
#[async_trait::async_trait]
pub trait GstDetailsService: Send + Sync {
    /// `None` (or an empty map) means nothing to apply.
    async fn fetch_gst_details(&self, req: &ReconcileRequest) -> Result<Option<FieldMap>>;
}

/// Registry lookup keyed by `(gstin, as_of)`.
#[async_trait::async_trait]
pub trait GstinLookup: Send + Sync {
    async fn fetch_gstin_status(
        &self,
        gstin: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<Option<RegistryEntry>>;
}

#[async_trait::async_trait]
pub trait PartyDetailsService: Send + Sync {
    async fn fetch_party_details(&self, req: &PartyDetailsRequest) -> Result<Option<FieldMap>>;
}
