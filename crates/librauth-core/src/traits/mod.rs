//! Core traits implemented by infrastructure crates.

pub mod registry;

pub use registry::RegistryProvider;
