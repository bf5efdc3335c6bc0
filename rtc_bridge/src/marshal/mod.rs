pub mod host_value;
pub mod to_host;
