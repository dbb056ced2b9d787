//! Repository implementations over the Credential Store.

pub mod user;

pub use user::UserRepository;
