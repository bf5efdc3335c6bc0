pub mod handler;
pub mod raw;
pub mod types;
