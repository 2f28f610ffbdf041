pub mod memory;
pub mod redis;
pub mod store;

pub use memory::MemoryStore;
pub use store::{HashStore, StoreError};
