pub mod config_module;
pub mod logging_module;
pub mod lua_module;
