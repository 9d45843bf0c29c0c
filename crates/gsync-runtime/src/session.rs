use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use futures_util::future::{join_all, BoxFuture};
use futures_util::FutureExt;
use gsync_reconcile::{
    build_party_details_request, build_request, is_monitored, Admission, CycleTicket,
    ReconcileState,
};
use gsync_remote::{FrappeClient, GstDetailsService, GstinLookup, PartyDetailsService};
use gsync_rules::{
    check_overseas_gate, ecommerce_supply_type, invoice_no_banner, validate_transporter_id,
};
use gsync_schemas::{
    fields, parse_date, DocKind, FieldMap, GstError, GstSettings, RegistryEntry, TransactionRecord,
};
use gsync_status::{status_description, validate_gstin_status, StatusCache, ValidationContext};
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{FormView, InflightTracker};

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

/// Outbound ports a session calls.
#[derive(Clone)]
pub struct Services {
    pub gst_details: Arc<dyn GstDetailsService>,
    pub gstin_lookup: Arc<dyn GstinLookup>,
    pub party_details: Arc<dyn PartyDetailsService>,
}

impl Services {
    /// All three ports served by one host client.
    pub fn from_client(client: FrappeClient) -> Self {
        let client = Arc::new(client);
        Self {
            gst_details: client.clone(),
            gstin_lookup: client.clone(),
            party_details: client,
        }
    }
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct SessionState {
    reconcile: ReconcileState,
    cache: StatusCache,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone, Copy, Debug)]
enum WriteBack {
    Result,
    PartyDetails,
}

/// Holds a write-back flag for as long as it lives.
struct WriteBackGuard<'a> {
    session: &'a FormSession,
    kind: WriteBack,
}

impl<'a> WriteBackGuard<'a> {
    fn enter(session: &'a FormSession, kind: WriteBack) -> Self {
        let mut st = session.state();
        match kind {
            WriteBack::Result => st.reconcile.begin_apply(),
            WriteBack::PartyDetails => st.reconcile.begin_party_details(),
        }
        Self { session, kind }
    }
}

impl Drop for WriteBackGuard<'_> {
    fn drop(&mut self) {
        let mut st = self.session.state();
        match self.kind {
            WriteBack::Result => st.reconcile.end_apply(),
            WriteBack::PartyDetails => st.reconcile.end_party_details(),
        }
    }
}

/// An admitted cycle that has not consumed its ticket yet. Dropping it
/// unconsumed reopens the coordinator for new cycles.
struct PendingCycle<'a> {
    session: &'a FormSession,
    company: Option<String>,
}

impl PendingCycle<'_> {
    fn take(&mut self) -> Option<CycleTicket> {
        let company = self.company.take()?;
        Some(self.session.state().reconcile.take_cycle(company))
    }
}

impl Drop for PendingCycle<'_> {
    fn drop(&mut self) {
        if self.company.is_some() {
            self.take();
        }
    }
}

// ---------------------------------------------------------------------------
// FormSession
// ---------------------------------------------------------------------------

/// One editing session over one transaction record.
pub struct FormSession {
    id: Uuid,
    kind: DocKind,
    settings: Arc<GstSettings>,
    services: Services,
    record: Mutex<TransactionRecord>,
    state: Mutex<SessionState>,
    view: Mutex<FormView>,
    inflight: InflightTracker,
}

impl std::fmt::Debug for FormSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormSession")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl FormSession {
    pub fn new(record: TransactionRecord, settings: Arc<GstSettings>, services: Services) -> Self {
        let id = Uuid::new_v4();
        debug!(session_id = %id, doctype = %record.kind, "session open");
        Self {
            id,
            kind: record.kind,
            settings,
            services,
            record: Mutex::new(record),
            state: Mutex::new(SessionState::default()),
            view: Mutex::new(FormView::default()),
            inflight: InflightTracker::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> DocKind {
        self.kind
    }

    /// Copy of the record as it stands.
    pub fn snapshot(&self) -> TransactionRecord {
        self.record().clone()
    }

    pub fn view(&self) -> FormView {
        lock(&self.view).clone()
    }

    pub fn get(&self, field: &str) -> Option<Value> {
        self.record().get(field).cloned()
    }

    /// Number of registry entries fetched in this session.
    pub fn cached_statuses(&self) -> usize {
        self.state().cache.len()
    }

    pub fn outstanding_work(&self) -> usize {
        self.inflight.outstanding()
    }

    fn record(&self) -> MutexGuard<'_, TransactionRecord> {
        lock(&self.record)
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        lock(&self.state)
    }

    fn view_mut(&self) -> MutexGuard<'_, FormView> {
        lock(&self.view)
    }

    // -- lifecycle ----------------------------------------------------------

    pub fn onload(&self) {
        if self.kind.ignores_port_code_validation() {
            self.view_mut()
                .ignore_validation
                .insert(fields::PORT_CODE.to_string());
        }
    }

    /// Show the party GSTIN status (no validation) and the naming headline.
    pub async fn refresh(&self) -> Result<()> {
        if self.kind.is_trade_transaction() {
            self.ensure_status(self.kind.party_gstin_field()).await?;
        }
        self.view_mut().headline = invoice_no_banner(self.kind, &self.settings);
        Ok(())
    }

    // -- field writes -------------------------------------------------------

    /// Write one field and route the change if the value changed.
    pub async fn set_value(&self, field: &str, value: Value) -> Result<()> {
        let changed = self.record().set(field, value);
        if changed {
            self.on_change(field).await?;
        }
        Ok(())
    }

    /// Write several fields, then route every change together.
    pub async fn set_values(&self, values: &FieldMap) -> Result<()> {
        let changed = self.record().set_many(values);
        self.dispatch_changes(&changed).await
    }

    async fn dispatch_changes(&self, changed: &[String]) -> Result<()> {
        let results = join_all(changed.iter().map(|f| self.on_change(f))).await;
        results.into_iter().collect::<Result<Vec<()>>>()?;
        Ok(())
    }

    /// Route a change of `field` to every handler of this kind.
    ///
    /// Reconciliation runs alongside the other handlers so that lookups they
    /// start are awaited by the cycle. Among the other handlers the first
    /// failure stops the rest.
    pub fn on_change<'a>(&'a self, field: &'a str) -> BoxFuture<'a, Result<()>> {
        async move {
            let (reconciled, handled) = tokio::join!(self.reconcile(field), self.route(field));
            reconciled?;
            handled
        }
        .boxed()
    }

    async fn route(&self, field: &str) -> Result<()> {
        let kind = self.kind;

        if kind.is_trade_transaction() {
            if field == fields::GST_CATEGORY {
                self.check_overseas()?;
            }
            if field == kind.party_gstin_field() || field == kind.date_field() {
                self.refresh_status_and_validate().await?;
            }
            if field == fields::GST_TRANSPORTER_ID {
                self.check_transporter_id()?;
            }
        }

        if kind.supports_ecommerce()
            && (field == fields::ECOMMERCE_GSTIN || field == fields::IS_REVERSE_CHARGE)
        {
            self.update_ecommerce_supply_type().await?;
        }

        if kind.is_subcontracting_movement() && field == fields::SUPPLIER {
            self.fetch_supplier_party_details().await?;
        }

        Ok(())
    }

    // -- reconciliation -----------------------------------------------------

    async fn reconcile(&self, trigger: &str) -> Result<()> {
        if !is_monitored(self.kind, trigger) {
            return Ok(());
        }

        let admission = {
            let rec = self.record();
            let mut st = self.state();
            st.reconcile.admit(&rec, trigger)
        };
        let company = match admission {
            Admission::Skipped(reason) => {
                debug!(session_id = %self.id, doctype = %self.kind, trigger, ?reason, "trigger skipped");
                return Ok(());
            }
            Admission::Coalesced => {
                debug!(session_id = %self.id, doctype = %self.kind, trigger, "trigger coalesced");
                return Ok(());
            }
            Admission::Started { company } => company,
        };

        let mut pending = PendingCycle {
            session: self,
            company: Some(company),
        };
        self.inflight.settled().await;

        let Some(ticket) = pending.take() else {
            return Ok(());
        };
        let req = {
            let rec = self.record();
            build_request(&rec, ticket)
        };

        info!(
            session_id = %self.id,
            doctype = %self.kind,
            trigger,
            update_place_of_supply = req.update_place_of_supply,
            "get_gst_details"
        );
        let fetched = {
            let _work = self.inflight.begin();
            self.services.gst_details.fetch_gst_details(&req).await?
        };

        match fetched {
            Some(values) if !values.is_empty() => self.apply_result(&values).await,
            _ => {
                debug!(session_id = %self.id, doctype = %self.kind, "nothing to apply");
                Ok(())
            }
        }
    }

    /// Write a reconciliation result. Reconciliation triggers stay blocked
    /// until every resulting change has been routed.
    async fn apply_result(&self, values: &FieldMap) -> Result<()> {
        let _applying = WriteBackGuard::enter(self, WriteBack::Result);
        let changed = self.record().set_many(values);
        debug!(session_id = %self.id, doctype = %self.kind, ?changed, "applied gst details");
        self.dispatch_changes(&changed).await
    }

    // -- registry status ----------------------------------------------------

    /// Registry entry for the GSTIN in `field`, fetched once per session.
    /// Concurrent calls for the same GSTIN wait on one lookup. Also refreshes the status description under the field.
    pub async fn ensure_status(&self, field: &str) -> Result<Option<Arc<RegistryEntry>>> {
        let (gstin, as_of) = {
            let rec = self.record();
            (
                rec.str(field).map(str::to_string),
                rec.str(self.kind.date_field()).and_then(parse_date),
            )
        };
        let Some(gstin) = gstin else {
            return Ok(None);
        };

        let slot = self.state().cache.slot(&gstin);
        let entry = match slot.get() {
            Some(entry) => entry,
            None => {
                let _work = self.inflight.begin();
                let resolved = slot
                    .resolve(|| async {
                        info!(session_id = %self.id, doctype = %self.kind, gstin = %gstin, "get_gstin_status");
                        self.services
                            .gstin_lookup
                            .fetch_gstin_status(&gstin, as_of)
                            .await
                    })
                    .await?;
                match resolved {
                    Some(entry) => entry,
                    None => return Ok(None),
                }
            }
        };

        self.view_mut()
            .descriptions
            .insert(field.to_string(), status_description(&entry));
        Ok(Some(entry))
    }

    async fn refresh_status_and_validate(&self) -> Result<()> {
        let field = self.kind.party_gstin_field();
        let Some(entry) = self.ensure_status(field).await? else {
            return Ok(());
        };
        if !self.settings.validate_gstin_status {
            return Ok(());
        }
        let ctx = {
            let rec = self.record();
            ValidationContext::for_record(&rec, field)
        };
        validate_gstin_status(&entry, &ctx).map_err(|e| self.user_error(e))
    }

    // -- derived fields -----------------------------------------------------

    fn check_overseas(&self) -> Result<()> {
        let outcome = check_overseas_gate(&self.record(), &self.settings);
        outcome.map_err(|e| self.user_error(e))
    }

    fn check_transporter_id(&self) -> Result<()> {
        let id = self
            .record()
            .str(fields::GST_TRANSPORTER_ID)
            .unwrap_or_default()
            .to_string();
        validate_transporter_id(&id).map_err(|e| self.user_error(e))
    }

    async fn update_ecommerce_supply_type(&self) -> Result<()> {
        let update = ecommerce_supply_type(&self.record(), &self.settings);
        match update.value() {
            Some(value) => self.set_value(fields::ECOMMERCE_SUPPLY_TYPE, value).await,
            None => Ok(()),
        }
    }

    // -- subcontracting -----------------------------------------------------

    /// Pull the supplier's address and GSTIN for a subcontracting movement.
    async fn fetch_supplier_party_details(&self) -> Result<()> {
        tokio::task::yield_now().await;

        let req = {
            let rec = self.record();
            build_party_details_request(&rec)
        };

        self.view_mut()
            .ignore_link_validation
            .insert(fields::SUPPLIER_ADDRESS.to_string());
        info!(session_id = %self.id, doctype = %self.kind, "get_party_details_for_subcontracting");
        let fetched = {
            let _work = self.inflight.begin();
            self.services.party_details.fetch_party_details(&req).await
        };
        self.view_mut()
            .ignore_link_validation
            .remove(fields::SUPPLIER_ADDRESS);

        let Some(details) = fetched? else {
            return Ok(());
        };
        let _updating = WriteBackGuard::enter(self, WriteBack::PartyDetails);
        let changed = self.record().set_many(&details);
        self.dispatch_changes(&changed).await
    }

    fn user_error(&self, err: GstError) -> anyhow::Error {
        warn!(
            session_id = %self.id,
            doctype = %self.kind,
            title = err.title(),
            message = err.message(),
            "validation failed"
        );
        anyhow::Error::from(err)
    }
}
