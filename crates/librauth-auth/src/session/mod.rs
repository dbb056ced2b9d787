//! Session revocation.

pub mod revoker;

pub use revoker::SessionRevoker;
