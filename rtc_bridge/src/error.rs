// rtc_bridge/src/error.rs
use crate::dispatch::policy::RejectReason;
use thiserror::Error;

/// Errors raised inside the bridge. None of them ever reach the engine's
/// calling thread; a failed event is logged and skipped.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("could not allocate {requested} records for '{event}'")]
    Allocation { event: &'static str, requested: usize },

    #[error("dispatch queue is closed")]
    QueueClosed,

    #[error("dispatch queue stayed full past the producer timeout")]
    QueueTimeout,

    #[error("handler for '{event}' failed: {message}")]
    HostInvocation { event: &'static str, message: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("logger: {0}")]
    Logger(#[from] flexi_logger::FlexiLoggerError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type BridgeResult<T> = Result<T, BridgeError>;

impl From<RejectReason> for BridgeError {
    fn from(reason: RejectReason) -> Self {
        match reason {
            RejectReason::Closed => BridgeError::QueueClosed,
            RejectReason::TimedOut => BridgeError::QueueTimeout,
        }
    }
}
