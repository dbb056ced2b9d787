//! Domain entities shared across librauth crates.

pub mod user;

pub use user::User;
