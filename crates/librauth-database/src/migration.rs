//! Embedded schema migrations.

use sqlx::MySqlPool;
use tracing::info;

use librauth_core::error::{AppError, ErrorKind};

/// Run all pending migrations against the given pool.
pub async fn run_migrations(pool: &MySqlPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::CredentialStoreUnavailable, "Migration failed", e))?;

    info!("Database migrations complete");
    Ok(())
}
