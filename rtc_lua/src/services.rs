// rtc_lua/src/services.rs
use rtc_bridge::registry::callback_registry::CallbackRegistry;
use crate::lua_host::LuaHost;
use std::rc::Rc;
use mlua::Lua;

/// Services shared by the Lua modules of one Lua state.
pub struct RtcServices {
    pub registry: Rc<CallbackRegistry<LuaHost>>,
}

impl RtcServices {
    pub fn new() -> Self {
        Self { registry: Rc::new(CallbackRegistry::new()) }
    }
}

/// The registry `rtc.on` writes to for this Lua state. Created on first use
/// and stored as the state's app data, so two states never see each other's
/// handlers.
pub fn instance(lua: &Lua) -> Rc<CallbackRegistry<LuaHost>> {
    if let Some(services) = lua.app_data_ref::<RtcServices>() {
        return Rc::clone(&services.registry);
    }

    let services = RtcServices::new();
    let registry = Rc::clone(&services.registry);
    lua.set_app_data(services);
    registry
}

/// Drops every handler registered through this Lua state.
pub fn clear_handlers(lua: &Lua) {
    if let Some(services) = lua.app_data_ref::<RtcServices>() {
        services.registry.clear();
    }
}
