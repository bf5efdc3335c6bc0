// rtc_bridge/src/payload/external_frame.rs
use std::sync::Arc;

/// A block of caller-owned memory forwarded to the host without copying.
///
/// The bridge only holds a shared reference; the caller decides how long the
/// backing storage lives.
#[derive(Clone)]
pub struct ExternalFrame {
    owner: Arc<dyn AsRef<[u8]> + Send + Sync>,
}

impl ExternalFrame {
    pub fn new<B>(owner: B) -> Self
    where
        B: AsRef<[u8]> + Send + Sync + 'static,
    {
        Self { owner: Arc::new(owner) }
    }

    pub fn from_shared(owner: Arc<dyn AsRef<[u8]> + Send + Sync>) -> Self {
        Self { owner }
    }

    pub fn as_bytes(&self) -> &[u8] {
        (*self.owner).as_ref()
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// True when both frames view the same memory.
    pub fn same_frame(&self, other: &ExternalFrame) -> bool {
        let (a, b) = (self.as_bytes(), other.as_bytes());
        std::ptr::eq(a.as_ptr(), b.as_ptr()) && a.len() == b.len()
    }
}

impl PartialEq for ExternalFrame {
    fn eq(&self, other: &Self) -> bool {
        self.same_frame(other)
    }
}

impl std::fmt::Debug for ExternalFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalFrame")
            .field("ptr", &self.as_bytes().as_ptr())
            .field("len", &self.len())
            .finish()
    }
}
