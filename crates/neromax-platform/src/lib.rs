pub mod api;
pub mod identity;
pub mod ids;
pub mod storage;
