//! Pick a storage backend from configuration.
//!
//! `Auto` prefers localStorage and degrades to memory, so the client
//! still works (non-durably) in contexts where storage access is
//! denied.

use neromax_core::ports::StoragePort;
use neromax_types::config::StorageBackendType;
use std::rc::Rc;

use super::{LocalStorage, MemoryStorage};

/// Open the configured backend. Returns a trait object so callers stay
/// backend-agnostic.
pub fn open_storage(backend: &StorageBackendType) -> Rc<dyn StoragePort> {
    match backend {
        StorageBackendType::Memory => Rc::new(MemoryStorage::new()),
        StorageBackendType::LocalStorage | StorageBackendType::Auto => {
            match LocalStorage::open() {
                Ok(store) => {
                    log::info!("Storage backend: localStorage");
                    Rc::new(store)
                }
                Err(e) => {
                    log::warn!("localStorage unavailable ({}), falling back to memory", e);
                    Rc::new(MemoryStorage::new())
                }
            }
        }
    }
}
