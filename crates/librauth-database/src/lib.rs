//! Credential Store: MariaDB/MySQL connection pool and repositories.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
