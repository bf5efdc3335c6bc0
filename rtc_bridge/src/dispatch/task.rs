// rtc_bridge/src/dispatch/task.rs
use crate::router::event::Event;

/// Unit of work executed on the consumer thread.
pub enum Task {
    /// An engine event waiting for lookup, marshalling and invocation.
    Event(Event),
    /// Ad-hoc closure run on the consumer thread.
    Custom(Box<dyn FnOnce() + Send>),
}

impl Task {
    pub fn custom<F: FnOnce() + Send + 'static>(f: F) -> Self {
        Task::Custom(Box::new(f))
    }

    /// Name used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Task::Event(event) => event.kind().as_str(),
            Task::Custom(_) => "custom",
        }
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Task::Event(event) => f.debug_tuple("Event").field(event).finish(),
            Task::Custom(_) => f.write_str("Custom"),
        }
    }
}
