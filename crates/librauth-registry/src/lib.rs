//! Session Registry backends for librauth.
//!
//! The registry is the shared key-value space holding token allowlists and
//! blacklists. The Redis backend is the production provider; the in-memory
//! backend serves tests and single-node development.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::RegistryManager;
