//! Lua host for `rtc_bridge`. Scripts subscribe with `rtc.on(name, handler)`
//! and receive engine events on the thread that owns the Lua state.
pub mod lua_constants;
pub mod lua_host;
pub mod modules;
pub mod runtime;
pub mod services;
pub mod simulator;
