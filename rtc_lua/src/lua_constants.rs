// rtc_lua/src/lua_constants.rs

// .rtc APIS
pub const RTC: &str = "rtc";
pub const RTC_ON: &str = "on";
pub const RTC_OFF: &str = "off";
pub const RTC_EVENTS: &str = "events";
pub const LOG: &str = "log";
pub const CONFIG: &str = "config";

// Frame userdata methods
pub const FRAME_LEN: &str = "len";
pub const FRAME_BYTE: &str = "byte";
pub const FRAME_TO_STRING: &str = "to_string";
