//! Core building blocks shared by every librauth crate: the unified error
//! type, configuration schemas, and the Session Registry trait.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
