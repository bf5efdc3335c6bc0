// rtc_bridge/src/dispatch/policy.rs
use serde::Deserialize;
use serde::Serialize;
use std::time::Duration;

/// What the queue does when producers outpace the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QueuePolicy {
    /// Grow without limit. Producers never wait and nothing is dropped.
    #[default]
    Unbounded,
    /// Keep at most `capacity` tasks; a new task evicts the oldest pending one.
    DropOldest { capacity: usize },
    /// Keep at most `capacity` tasks; a producer waits up to `timeout_ms` for
    /// room, then its task is rejected.
    BlockWithTimeout { capacity: usize, timeout_ms: u64 },
}

impl QueuePolicy {
    pub fn capacity(&self) -> Option<usize> {
        match *self {
            QueuePolicy::Unbounded => None,
            QueuePolicy::DropOldest { capacity } => Some(capacity.max(1)),
            QueuePolicy::BlockWithTimeout { capacity, .. } => Some(capacity.max(1)),
        }
    }

    pub(crate) fn timeout(&self) -> Option<Duration> {
        match *self {
            QueuePolicy::BlockWithTimeout { timeout_ms, .. } => Some(Duration::from_millis(timeout_ms)),
            _ => None,
        }
    }
}

/// Result of handing a task to the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueOutcome {
    Queued,
    /// Queued after evicting the oldest pending task.
    QueuedEvictedOldest,
    Rejected(RejectReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Closed,
    TimedOut,
}

impl EnqueueOutcome {
    pub fn is_queued(&self) -> bool {
        !matches!(self, EnqueueOutcome::Rejected(_))
    }
}
