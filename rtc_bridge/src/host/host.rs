// rtc_bridge/src/host/host.rs
use crate::marshal::host_value::HostValue;

/// The scripting host the bridge delivers to. Only ever used from the
/// consumer thread.
pub trait Host {
    /// Reference to a host-callable function.
    type Function: Clone;
    /// Opaque value stored at registration and handed back on every call.
    type Context: Clone;
    type Error: std::fmt::Display;

    /// Calls `function` with `context` as receiver and `args` in order.
    fn invoke(
        &self,
        function: &Self::Function,
        context: &Self::Context,
        args: Vec<HostValue>,
    ) -> Result<(), Self::Error>;
}
