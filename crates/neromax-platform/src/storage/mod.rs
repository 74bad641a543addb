pub mod local_storage;
pub mod memory;
pub mod open;

pub use local_storage::LocalStorage;
pub use memory::MemoryStorage;
pub use open::open_storage;
