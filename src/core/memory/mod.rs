pub mod store;

// Re-export commonly used types
pub use store::{build_store, BackingStore, CombinationalStore, MemoryData, RegisteredStore};
