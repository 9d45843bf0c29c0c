use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use gsync_reconcile::{PartyDetailsRequest, ReconcileRequest};
use gsync_remote::{GstDetailsService, GstinLookup, PartyDetailsService};
use gsync_schemas::{FieldMap, RegistryEntry};
use tokio::sync::Semaphore;

type Reply = std::result::Result<Option<FieldMap>, String>;

// ---------------------------------------------------------------------------
// Reconciliation service
// ---------------------------------------------------------------------------

/// Records each request. Replies are taken from a queue; an exhausted queue
/// answers "nothing to apply".
#[derive(Default)]
pub struct RecordingGstDetails {
    calls: Mutex<Vec<ReconcileRequest>>,
    replies: Mutex<VecDeque<Reply>>,
    watch: Option<Arc<CountingLookup>>,
    completed_at_request: Mutex<Vec<usize>>,
}

impl RecordingGstDetails {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note how many lookups had completed whenever a request arrives.
    pub fn watching(lookup: Arc<CountingLookup>) -> Self {
        Self {
            watch: Some(lookup),
            ..Self::default()
        }
    }

    pub fn reply_with(&self, values: FieldMap) {
        self.replies.lock().unwrap().push_back(Ok(Some(values)));
    }

    pub fn fail_next(&self, message: &str) {
        self.replies.lock().unwrap().push_back(Err(message.to_string()));
    }

    pub fn calls(&self) -> Vec<ReconcileRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn completed_at_request(&self) -> Vec<usize> {
        self.completed_at_request.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl GstDetailsService for RecordingGstDetails {
    async fn fetch_gst_details(&self, req: &ReconcileRequest) -> Result<Option<FieldMap>> {
        if let Some(lookup) = &self.watch {
            self.completed_at_request.lock().unwrap().push(lookup.completed());
        }
        self.calls.lock().unwrap().push(req.clone());
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            None => Ok(None),
            Some(Ok(values)) => Ok(values),
            Some(Err(message)) => Err(anyhow!(message)),
        }
    }
}

// ---------------------------------------------------------------------------
// Registry lookup
// ---------------------------------------------------------------------------

/// Registry lookups answered from a fixed table. Unknown GSTINs answer `None`.
#[derive(Default)]
pub struct CountingLookup {
    entries: HashMap<String, RegistryEntry>,
    calls: Mutex<Vec<(String, Option<NaiveDate>)>>,
    completed: AtomicUsize,
    gate: Option<Semaphore>,
}

impl CountingLookup {
    pub fn new(entries: impl IntoIterator<Item = RegistryEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|e| (e.gstin.clone(), e))
                .collect(),
            ..Self::default()
        }
    }

    /// Every lookup waits for a [`CountingLookup::release`].
    pub fn gated(entries: impl IntoIterator<Item = RegistryEntry>) -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new(entries)
        }
    }

    /// Let `n` waiting (or future) lookups complete.
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    pub fn calls(&self) -> Vec<(String, Option<NaiveDate>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl GstinLookup for CountingLookup {
    async fn fetch_gstin_status(
        &self,
        gstin: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<Option<RegistryEntry>> {
        self.calls.lock().unwrap().push((gstin.to_string(), as_of));
        if let Some(gate) = &self.gate {
            gate.acquire().await?.forget();
        }
        self.completed.fetch_add(1, Ordering::SeqCst);
        Ok(self.entries.get(gstin).cloned())
    }
}

// ---------------------------------------------------------------------------
// Subcontracting party details
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingPartyDetails {
    calls: Mutex<Vec<PartyDetailsRequest>>,
    reply: Mutex<Option<Reply>>,
}

impl RecordingPartyDetails {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_with(&self, values: FieldMap) {
        *self.reply.lock().unwrap() = Some(Ok(Some(values)));
    }

    pub fn fail_with(&self, message: &str) {
        *self.reply.lock().unwrap() = Some(Err(message.to_string()));
    }

    pub fn calls(&self) -> Vec<PartyDetailsRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl PartyDetailsService for RecordingPartyDetails {
    async fn fetch_party_details(&self, req: &PartyDetailsRequest) -> Result<Option<FieldMap>> {
        self.calls.lock().unwrap().push(req.clone());
        let reply = self.reply.lock().unwrap().clone();
        match reply {
            None => Ok(None),
            Some(Ok(values)) => Ok(values),
            Some(Err(message)) => Err(anyhow!(message)),
        }
    }
}
