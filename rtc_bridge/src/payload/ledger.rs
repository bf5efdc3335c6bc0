// rtc_bridge/src/payload/ledger.rs
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[derive(Debug, Default)]
struct Counts {
    allocated: AtomicU64,
    released: AtomicU64,
}

/// Counts payload buffers so leaks show up as a non-zero live count.
/// Clones share the same counters.
#[derive(Debug, Clone, Default)]
pub struct BufferLedger {
    counts: Arc<Counts>,
}

impl BufferLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn acquire(&self) {
        self.counts.allocated.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn release(&self) {
        self.counts.released.fetch_add(1, Ordering::Relaxed);
    }

    /// Buffers allocated and not yet released.
    pub fn live(&self) -> u64 {
        let released = self.counts.released.load(Ordering::Acquire);
        let allocated = self.counts.allocated.load(Ordering::Acquire);
        allocated.saturating_sub(released)
    }

    pub fn allocated(&self) -> u64 {
        self.counts.allocated.load(Ordering::Acquire)
    }

    pub fn released(&self) -> u64 {
        self.counts.released.load(Ordering::Acquire)
    }
}
