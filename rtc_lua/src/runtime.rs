// rtc_lua/src/runtime.rs
use rtc_bridge::dispatch::policy::QueuePolicy;
use rtc_bridge::router::event_kind::EventKind;
use crate::modules::lua_module::LuaModuleRegistry;
use crate::services::{clear_handlers, instance};
use crate::lua_host::LuaHost;
use crate::lua_constants::*;
use rtc_bridge::bridge::Bridge;
use mlua::prelude::LuaResult;
use rtc_bridge::*;
use std::path::Path;
use mlua::Function;
use mlua::Value;
use mlua::Lua;
use std::fs;

/// A Lua state wired to a bridge. Lives on the consumer thread.
pub struct LuaRuntime {
    bridge: Bridge<LuaHost>,
}

impl LuaRuntime {
    pub fn new(policy: QueuePolicy) -> LuaResult<Self> {
        let lua = Lua::new();
        let registry = instance(&lua);
        let bridge = Bridge::with_registry(LuaHost::new(lua), policy, registry);
        let runtime = Self { bridge };
        runtime.init()?;
        Ok(runtime)
    }

    fn init(&self) -> LuaResult<()> {
        // .rtc module
        Self::register_rtc_module(self.lua())?;

        // Sub-modules
        for descriptor in inventory::iter::<LuaModuleRegistry> {
            let module = (descriptor.ctor)();
            if let Err(e) = module.register(self.lua()) {
                bridge_error!("Lua module registration failed: {e}");
            }
        }
        Ok(())
    }

    /// Builds the `rtc` table with `on`, `off` and `events`.
    fn register_rtc_module(lua: &Lua) -> LuaResult<()> {
        let rtc_mod = lua.create_table()?;

        // rtc.on(name, handler [, context])
        let on_fn = lua.create_function(
            |lua, (name, handler, context): (String, Function, Value)| {
                if EventKind::from_name(&name).is_none() {
                    bridge_warn!("'{}' is not an engine event, the handler will never run.", name);
                }
                Ok(instance(lua).register(name, handler, context))
            },
        )?;
        rtc_mod.set(RTC_ON, on_fn)?;

        // rtc.off(name)
        let off_fn = lua.create_function(|lua, name: String| Ok(instance(lua).unregister(&name)))?;
        rtc_mod.set(RTC_OFF, off_fn)?;

        // rtc.events()
        let events_fn = lua.create_function(|lua, ()| {
            lua.create_sequence_from(
                EventKind::ALL
                    .iter()
                    .filter(|kind| kind.is_implemented())
                    .map(|kind| kind.as_str()),
            )
        })?;
        rtc_mod.set(RTC_EVENTS, events_fn)?;

        lua.globals().set(RTC, rtc_mod.clone())?;
        lua.register_module(RTC, &rtc_mod)?;
        Ok(())
    }

    pub fn lua(&self) -> &Lua {
        self.bridge.host().lua()
    }

    pub fn bridge(&self) -> &Bridge<LuaHost> {
        &self.bridge
    }

    /// Runs a chunk of Lua source.
    pub fn exec(&self, source: &str) -> LuaResult<()> {
        self.lua().load(source).exec()
    }

    /// Loads and runs a script file.
    pub fn load_script(&self, path: &Path) -> LuaResult<()> {
        let source = fs::read_to_string(path).map_err(mlua::Error::external)?;
        self.lua()
            .load(&source)
            .set_name(format!("@{}", path.display()))
            .exec()
    }
}

impl Drop for LuaRuntime {
    fn drop(&mut self) {
        // Handlers belong to this Lua state.
        clear_handlers(self.lua());
    }
}
