// rtc_lua/src/modules/logging_module.rs
use crate::modules::lua_module::LuaModule;
use crate::register_lua_module;
use crate::lua_constants::*;
use rtc_bridge::*;
use mlua::Variadic;
use mlua::Function;
use mlua::Table;
use mlua::Value;
use mlua::Lua;

/// Log-level strings that are exposed to Lua.
pub const LOG_INFO: &str = "info";
pub const LOG_WARN: &str = "warn";
pub const LOG_ERROR: &str = "error";
pub const LOG_DEBUG: &str = "debug";

/// Lua module that exposes the four log levels as `rtc.log`.
#[derive(Default)]
pub struct LoggingModule;
register_lua_module!(LoggingModule);

impl LuaModule for LoggingModule {
    fn register(&self, lua: &Lua) -> mlua::Result<()> {
        fn level_wrapper(lua: &Lua, level_name: &'static str) -> mlua::Result<Function> {
            lua.create_function(move |_lua, args: Variadic<Value>| {
                let msg = match args.first() {
                    Some(Value::String(s)) => s.to_str()?.to_owned(),
                    Some(other) => other.to_string()?,
                    None => {
                        return Err(mlua::Error::RuntimeError(format!(
                            "{level_name} expects a message"
                        )));
                    }
                };

                match level_name {
                    LOG_INFO => bridge_info!("[Lua] {}", msg),
                    LOG_WARN => bridge_warn!("[Lua] {}", msg),
                    LOG_ERROR => bridge_error!("[Lua] {}", msg),
                    _ => bridge_debug!("[Lua] {}", msg),
                }
                Ok(())
            })
        }

        let log_tbl = lua.create_table()?;
        for level in [LOG_INFO, LOG_WARN, LOG_ERROR, LOG_DEBUG] {
            log_tbl.set(level, level_wrapper(lua, level)?)?;
        }

        let rtc: Table = lua.globals().get(RTC)?;
        rtc.set(LOG, log_tbl)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtc_bridge::logging::logging::last_log;

    #[test]
    fn messages_reach_the_bridge_log() {
        let lua = Lua::new();
        lua.globals().set(RTC, lua.create_table().unwrap()).unwrap();
        LoggingModule.register(&lua).unwrap();

        lua.load(r#"rtc.log.warn("lua says hi")"#).exec().unwrap();
        // Other tests log concurrently, so only check the call went through.
        assert!(!last_log().is_empty());

        let err = lua.load("rtc.log.info()").exec().unwrap_err();
        assert!(err.to_string().contains("info expects a message"));
    }
}
