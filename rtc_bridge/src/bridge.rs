// rtc_bridge/src/bridge.rs
use crate::dispatch::dispatcher::{DispatchStats, DrainQueue, dispatch_queue};
use crate::registry::callback_registry::CallbackRegistry;
use crate::router::event_router::EventRouter;
use crate::dispatch::policy::QueuePolicy;
use crate::payload::ledger::BufferLedger;
use crate::error::BridgeError;
use crate::router::event::Event;
use crate::dispatch::task::Task;
use crate::host::native_host::panic_message;
use crate::host::host::Host;
use std::panic::AssertUnwindSafe;
use std::panic::catch_unwind;
use std::time::Duration;
use std::sync::Arc;
use std::rc::Rc;

/// Consumer-side context. Owns the host, the callback registry and the drain
/// end of the queue, and hands out the [`EventRouter`] that engine threads
/// call into.
///
/// A `Bridge` lives on the host thread and is not `Send`.
pub struct Bridge<H: Host> {
    host: H,
    registry: Rc<CallbackRegistry<H>>,
    queue: DrainQueue<Task>,
    router: Arc<EventRouter>,
}

impl<H: Host> Bridge<H> {
    pub fn new(host: H, policy: QueuePolicy) -> Self {
        Self::with_registry(host, policy, Rc::new(CallbackRegistry::new()))
    }

    /// Creates a bridge that resolves handlers through an existing registry.
    pub fn with_registry(host: H, policy: QueuePolicy, registry: Rc<CallbackRegistry<H>>) -> Self {
        let (handle, queue) = dispatch_queue(policy);
        let router = Arc::new(EventRouter::new(handle, BufferLedger::new()));
        Self { host, registry, queue, router }
    }

    /// The producer entry points. Clone the `Arc` into every engine thread.
    pub fn router(&self) -> Arc<EventRouter> {
        Arc::clone(&self.router)
    }

    pub fn registry(&self) -> &Rc<CallbackRegistry<H>> {
        &self.registry
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn ledger(&self) -> &BufferLedger {
        self.router.ledger()
    }

    pub fn register(&self, name: impl Into<String>, handler: H::Function, context: H::Context) -> bool {
        self.registry.register(name, handler, context)
    }

    pub fn unregister(&self, name: &str) -> bool {
        self.registry.unregister(name)
    }

    /// Delivers everything queued so far and returns. Meant to be called once
    /// per host tick.
    pub fn pump(&self) -> usize {
        self.queue.drain_pending(|task| self.execute(task))
    }

    /// Delivers events until [`Bridge::shutdown`] or
    /// [`DispatchHandle::close`](crate::dispatch::dispatcher::DispatchHandle::close)
    /// is called and the queue is empty.
    ///
    /// Handlers run inline on this loop and must not block; a handler that
    /// never returns stalls every later event.
    pub fn run(&self) -> usize {
        self.queue.run(|task| self.execute(task))
    }

    /// Like [`Bridge::run`] but gives up after `timeout`.
    pub fn run_for(&self, timeout: Duration) -> usize {
        self.queue.run_for(timeout, |task| self.execute(task))
    }

    /// Stops accepting events and delivers the ones already queued.
    pub fn shutdown(&self) -> usize {
        self.queue.close();
        self.pump()
    }

    pub fn stats(&self) -> DispatchStats {
        self.queue.stats()
    }

    fn execute(&self, task: Task) {
        log::trace!("Executing '{}'.", task.label());
        match task {
            Task::Event(event) => self.deliver(event),
            Task::Custom(f) => {
                if let Err(panic) = catch_unwind(AssertUnwindSafe(f)) {
                    crate::bridge_error!("Custom task panicked: {}", panic_message(panic.as_ref()));
                }
            }
        }
    }

    /// Looks up, marshals and invokes. The event and every buffer it owns are
    /// released when this returns, whatever the outcome.
    fn deliver(&self, event: Event) {
        let name = event.kind().as_str();

        let Some(entry) = self.registry.lookup(name) else {
            log::trace!("No handler for '{}', dropped.", name);
            return;
        };

        let args = event.to_args();
        if let Err(e) = self.host.invoke(&entry.handler, &entry.context, args) {
            let err = BridgeError::HostInvocation { event: name, message: e.to_string() };
            crate::bridge_error!("{}", err);
        }
    }
}

impl<H: Host> Drop for Bridge<H> {
    fn drop(&mut self) {
        // Producers still holding the router see a closed queue from here on.
        self.queue.close();
    }
}
