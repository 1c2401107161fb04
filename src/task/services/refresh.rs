//! Ordered runner and bookkeeping for priority refreshes scheduled by
//! `add_task`.
//!
//! Refreshes run one at a time on a single background task, in the order
//! they were scheduled.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant};
use tracing::debug;

/// A scheduled refresh and the instant it becomes due.
#[derive(Debug)]
pub(super) struct RefreshRequest {
    pub(super) ticket: u64,
    pub(super) due: Instant,
}

/// Starts the refresh runner on `runtime`.
///
/// `refresh` is called once per request, never concurrently with itself.
/// The runner stops once every sender is dropped.
pub(super) fn spawn<F>(runtime: &Handle, refresh: F) -> mpsc::UnboundedSender<RefreshRequest>
where
    F: FnMut(u64) + Send + 'static,
{
    let (sender, receiver) = mpsc::unbounded_channel();
    runtime.spawn(run(receiver, refresh));
    sender
}

async fn run<F>(mut requests: mpsc::UnboundedReceiver<RefreshRequest>, mut refresh: F)
where
    F: FnMut(u64),
{
    while let Some(request) = requests.recv().await {
        if request.due > Instant::now() {
            time::sleep_until(request.due).await;
        } else {
            tokio::task::yield_now().await;
        }
        refresh(request.ticket);
    }
    debug!("priority refresh runner stopped");
}

/// Counts issued and finished refreshes.
#[derive(Debug)]
pub(super) struct RefreshTracker {
    issued: AtomicU64,
    finished: watch::Sender<u64>,
}

impl RefreshTracker {
    pub(super) fn new() -> Self {
        let (finished, _) = watch::channel(0);
        Self {
            issued: AtomicU64::new(0),
            finished,
        }
    }

    /// Draws the ticket for a newly scheduled refresh.
    pub(super) fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst).saturating_add(1)
    }

    /// Records that one issued refresh has finished.
    pub(super) fn finish(&self) {
        self.finished.send_modify(|count| *count = count.saturating_add(1));
    }

    /// Returns how many issued refreshes have not finished yet.
    pub(super) fn pending(&self) -> u64 {
        let finished = *self.finished.borrow();
        self.issued.load(Ordering::SeqCst).saturating_sub(finished)
    }

    /// Waits until as many refreshes have finished as were issued before
    /// this call.
    pub(super) async fn settled(&self) {
        let awaited = self.issued.load(Ordering::SeqCst);
        let mut finished = self.finished.subscribe();
        if finished.wait_for(|count| *count >= awaited).await.is_err() {
            debug!(awaited, "refresh tracker closed before settling");
        }
    }
}
