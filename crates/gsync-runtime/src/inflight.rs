use tokio::sync::watch;

/// Counts outstanding outbound calls for one session.
#[derive(Debug)]
pub struct InflightTracker {
    tx: watch::Sender<usize>,
}

impl Default for InflightTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl InflightTracker {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0usize);
        Self { tx }
    }

    /// Register one unit of work. It ends when the guard drops.
    pub fn begin(&self) -> InflightGuard<'_> {
        self.tx.send_modify(|n| *n += 1);
        InflightGuard { tracker: self }
    }

    pub fn outstanding(&self) -> usize {
        *self.tx.borrow()
    }

    /// Resolve once no work is outstanding. Always yields to the scheduler
    /// first, so work started by sibling futures is counted.
    pub async fn settled(&self) {
        tokio::task::yield_now().await;
        let mut rx = self.tx.subscribe();
        // the sender lives in self, so the channel cannot close here
        let _ = rx.wait_for(|n| *n == 0).await;
    }
}

#[must_use = "work ends when the guard is dropped"]
#[derive(Debug)]
pub struct InflightGuard<'a> {
    tracker: &'a InflightTracker,
}

impl Drop for InflightGuard<'_> {
    fn drop(&mut self) {
        self.tracker.tx.send_modify(|n| *n = n.saturating_sub(1));
    }
}
