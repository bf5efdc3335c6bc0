//! Delivers events raised on the communication engine's threads to a
//! single-threaded scripting host.
//!
//! Producer threads call into an [`router::event_router::EventRouter`], which
//! copies engine-owned data into owned payloads and queues them. The host
//! thread drains the queue through a [`bridge::Bridge`], which looks up the
//! registered callback, marshals the payload and invokes it.
pub mod bridge;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod host;
pub mod logging;
pub mod marshal;
pub mod payload;
pub mod registry;
pub mod router;
