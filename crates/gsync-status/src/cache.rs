use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use gsync_schemas::RegistryEntry;
use tokio::sync::OnceCell;

/// Registry entries fetched during one editing session, keyed by GSTIN.
///
/// Each GSTIN owns a [`StatusSlot`]. Callers take the slot under the session
/// lock and resolve it after releasing the lock, so concurrent checks of the
/// same GSTIN share a single lookup. Dropped together with the session.
#[derive(Debug, Default)]
pub struct StatusCache {
    slots: HashMap<String, StatusSlot>,
}

impl StatusCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolved entry, if any.
    pub fn get(&self, gstin: &str) -> Option<Arc<RegistryEntry>> {
        self.slots.get(gstin).and_then(StatusSlot::get)
    }

    /// Slot for `gstin`, created empty on first use.
    pub fn slot(&mut self, gstin: &str) -> StatusSlot {
        self.slots.entry(gstin.to_string()).or_default().clone()
    }

    /// Number of resolved entries.
    pub fn len(&self) -> usize {
        self.slots.values().filter(|s| s.get().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One GSTIN's lookup, resolved at most once with a found entry.
#[derive(Clone, Debug, Default)]
pub struct StatusSlot(Arc<OnceCell<Arc<RegistryEntry>>>);

enum Miss {
    NotFound,
    Failed(anyhow::Error),
}

impl StatusSlot {
    pub fn get(&self) -> Option<Arc<RegistryEntry>> {
        self.0.get().cloned()
    }

    /// Resolve the slot with `fetch` unless it already holds an entry.
    ///
    /// Callers arriving while a fetch runs wait for it. A fetch that finds
    /// nothing or fails leaves the slot empty; the next waiter fetches again.
    pub async fn resolve<F, Fut>(&self, fetch: F) -> Result<Option<Arc<RegistryEntry>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<RegistryEntry>>>,
    {
        let resolved = self
            .0
            .get_or_try_init(|| async move {
                match fetch().await {
                    Ok(Some(entry)) => Ok(Arc::new(entry)),
                    Ok(None) => Err(Miss::NotFound),
                    Err(err) => Err(Miss::Failed(err)),
                }
            })
            .await;
        match resolved {
            Ok(entry) => Ok(Some(Arc::clone(entry))),
            Err(Miss::NotFound) => Ok(None),
            Err(Miss::Failed(err)) => Err(err),
        }
    }
}
