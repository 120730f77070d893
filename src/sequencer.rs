use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonically increasing request identifier. Later requests compare
/// greater, which is what reducers use to discard stale completions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeqNo(u64);

impl SeqNo {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Single source of request ordering. Exactly one instance is shared by all
/// loaders in a process (through `QueryContext`); duplicating it per call
/// site would break the ordering guarantee. Tests construct their own.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    counter: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next sequence number, strictly greater than any number
    /// previously returned by this sequencer.
    pub fn next(&self) -> SeqNo {
        SeqNo(self.counter.fetch_add(1, Ordering::Relaxed) + 1)
    }
}
