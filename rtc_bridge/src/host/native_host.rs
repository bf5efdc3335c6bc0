// rtc_bridge/src/host/native_host.rs
use crate::marshal::host_value::HostValue;
use crate::host::host::Host;
use std::panic::AssertUnwindSafe;
use std::panic::catch_unwind;
use std::any::Any;
use std::sync::Arc;

pub type NativeContext = Arc<dyn Any + Send + Sync>;

/// A Rust closure registered as an event handler.
pub type NativeFn = Arc<dyn Fn(&NativeContext, &[HostValue]) -> Result<(), String> + Send + Sync>;

/// Host whose functions are plain Rust closures. Used to embed the bridge in
/// Rust applications and to test it without a scripting runtime.
#[derive(Default, Clone, Copy)]
pub struct NativeHost;

impl NativeHost {
    /// Wraps a closure as a handler.
    pub fn function<F>(f: F) -> NativeFn
    where
        F: Fn(&NativeContext, &[HostValue]) -> Result<(), String> + Send + Sync + 'static,
    {
        Arc::new(f)
    }

    /// Context for handlers that do not need one.
    pub fn no_context() -> NativeContext {
        Arc::new(())
    }
}

impl Host for NativeHost {
    type Function = NativeFn;
    type Context = NativeContext;
    type Error = String;

    fn invoke(
        &self,
        function: &NativeFn,
        context: &NativeContext,
        args: Vec<HostValue>,
    ) -> Result<(), String> {
        // A panicking handler is reported like any other handler failure.
        match catch_unwind(AssertUnwindSafe(|| function(context, &args))) {
            Ok(result) => result,
            Err(panic) => Err(panic_message(panic.as_ref())),
        }
    }
}

/// Text of a caught panic payload.
pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "handler panicked".to_string())
}
