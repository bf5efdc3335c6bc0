// rtc_lua/src/modules/lua_module.rs
use mlua::prelude::LuaResult;
use mlua::Lua;

/// Every sub-module of `rtc` that exposes Lua functions implements this.
pub trait LuaModule {
    /// Registers the module's functions on the `rtc` table. The table exists
    /// before any module is registered.
    fn register(&self, lua: &Lua) -> LuaResult<()>;
}

/// Registry that the inventory crate will collect.
pub struct LuaModuleRegistry {
    /// Called once for every module during start-up.
    pub ctor: fn() -> Box<dyn LuaModule>,
}

inventory::collect!(LuaModuleRegistry);

#[macro_export]
macro_rules! register_lua_module {
    ($ty:ty) => {
        inventory::submit! {
            $crate::modules::lua_module::LuaModuleRegistry {
                ctor: || Box::new(<$ty>::default()),
            }
        }
    };
}
