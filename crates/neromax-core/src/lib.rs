pub mod conversation;
pub mod directory;
pub mod event_bus;
pub mod keys;
pub mod ports;
