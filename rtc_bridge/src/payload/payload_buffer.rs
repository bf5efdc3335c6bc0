// rtc_bridge/src/payload/payload_buffer.rs
use crate::error::BridgeError;
use crate::error::BridgeResult;
use crate::payload::ledger::BufferLedger;
use std::ops::Deref;

/// Owned copy of a variable-length engine array.
///
/// The buffer is move-only. Dropping it is the release: the items drop in
/// order, any nested `PayloadBuffer` inside them releases the same way, and
/// the ledger records one release per buffer.
pub struct PayloadBuffer<T> {
    items: Vec<T>,
    ledger: BufferLedger,
}

impl<T> PayloadBuffer<T> {
    pub fn empty(ledger: &BufferLedger) -> Self {
        ledger.acquire();
        Self { items: Vec::new(), ledger: ledger.clone() }
    }

    /// Reserves room for `capacity` items up front so filling never reallocates.
    pub fn try_with_capacity(
        ledger: &BufferLedger,
        capacity: usize,
        event: &'static str,
    ) -> BridgeResult<Self> {
        let mut items = Vec::new();
        items
            .try_reserve_exact(capacity)
            .map_err(|_| BridgeError::Allocation { event, requested: capacity })?;
        ledger.acquire();
        Ok(Self { items, ledger: ledger.clone() })
    }

    /// Builds a buffer from items that are already owned.
    pub fn from_vec(ledger: &BufferLedger, items: Vec<T>) -> Self {
        ledger.acquire();
        Self { items, ledger: ledger.clone() }
    }

    pub(crate) fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> Deref for PayloadBuffer<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> Drop for PayloadBuffer<T> {
    fn drop(&mut self) {
        self.items.clear();
        self.ledger.release();
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for PayloadBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_releases_nested_buffers() {
        let ledger = BufferLedger::new();
        let mut outer = PayloadBuffer::try_with_capacity(&ledger, 2, "test").unwrap();
        outer.push(PayloadBuffer::from_vec(&ledger, vec![1, 2, 3]));
        outer.push(PayloadBuffer::empty(&ledger));
        assert_eq!(ledger.live(), 3);

        drop(outer);
        assert_eq!(ledger.live(), 0);
        assert_eq!(ledger.allocated(), 3);
        assert_eq!(ledger.released(), 3);
    }

    #[test]
    fn impossible_reservation_is_an_allocation_error() {
        let ledger = BufferLedger::new();
        let result = PayloadBuffer::<u64>::try_with_capacity(&ledger, usize::MAX, "onRemoteAudioStats");
        assert!(matches!(
            result,
            Err(BridgeError::Allocation { event: "onRemoteAudioStats", .. })
        ));
        assert_eq!(ledger.allocated(), 0);
    }

    #[test]
    fn moving_to_another_thread_releases_there() {
        let ledger = BufferLedger::new();
        let buffer = PayloadBuffer::from_vec(&ledger, vec![7u32; 16]);
        std::thread::spawn(move || assert_eq!(buffer.len(), 16))
            .join()
            .unwrap();
        assert_eq!(ledger.live(), 0);
    }
}
