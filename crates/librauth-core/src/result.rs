//! Convenience result type alias for librauth.

use crate::error::AppError;

/// A specialized `Result` type for librauth operations.
pub type AppResult<T> = Result<T, AppError>;
