//! In-memory registry provider.

pub mod store;

pub use store::MemoryRegistryProvider;
