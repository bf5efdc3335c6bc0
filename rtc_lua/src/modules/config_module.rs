// rtc_lua/src/modules/config_module.rs
use rtc_bridge::config::config::current_config;
use crate::modules::lua_module::LuaModule;
use crate::register_lua_module;
use crate::lua_constants::*;
use mlua::SerializeOptions;
use mlua::LuaSerdeExt;
use mlua::Table;
use mlua::Lua;

/// Exposes the active bridge config to scripts as a snapshot taken at
/// start-up, `rtc.config`.
#[derive(Default)]
pub struct ConfigModule;
register_lua_module!(ConfigModule);

impl LuaModule for ConfigModule {
    fn register(&self, lua: &Lua) -> mlua::Result<()> {
        // Unset options read as nil rather than `null`.
        let options = SerializeOptions::new().serialize_none_to_null(false);
        let config = lua.to_value_with(&current_config(), options)?;
        let rtc: Table = lua.globals().get(RTC)?;
        rtc.set(CONFIG, config)?;
        Ok(())
    }
}
