use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::AbortHandle;

use crate::action::Domain;
use crate::sequencer::SeqNo;

/// Quiescence window applied before a debounced remote call fires.
pub const DEFAULT_QUIESCENCE: Duration = Duration::from_millis(300);

/// Calls debounced through the same channel share one pending slot;
/// the slot always holds the highest-sequenced job seen so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DebounceChannel(pub Domain);

/// Collapses rapid repeated invocations on a channel into one. Jobs are
/// ordered by their sequence number, not by when they reach the debouncer:
/// the store's run loop spawns loader jobs onto a `JoinSet` whose first-poll
/// order is unspecified, so a newer invocation's job can arrive here before
/// an older one's.
pub struct Debouncer {
    window: Duration,
    pending: Mutex<HashMap<DebounceChannel, (SeqNo, AbortHandle)>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::with_window(DEFAULT_QUIESCENCE)
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Schedules `job` to run once the channel has been quiet for the
    /// configured window. A job replaces the pending one only when its
    /// sequence number is at least as new; a stale job is dropped without
    /// disturbing whatever is waiting.
    pub fn debounce<F>(&self, channel: DebounceChannel, seq: SeqNo, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut pending = self.pending.lock();
        if let Some((pending_seq, _)) = pending.get(&channel) {
            if seq < *pending_seq {
                return;
            }
        }
        if let Some((_, previous)) = pending.remove(&channel) {
            previous.abort();
        }
        let window = self.window;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            job.await;
        });
        pending.insert(channel, (seq, handle.abort_handle()));
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}
