pub mod host;
pub mod native_host;
