pub mod deep_copy;
pub mod external_frame;
pub mod ledger;
pub mod payload_buffer;
