//! Application assembly: wires the Credential Store, Session Registry, and
//! token core together and runs the HTTP server.

use std::sync::Arc;

use tracing::info;

use librauth_auth::credentials::CredentialStore;
use librauth_auth::jwt::issuer::TokenIssuer;
use librauth_auth::jwt::validator::TokenValidator;
use librauth_auth::password::PasswordHasher;
use librauth_auth::service::AuthService;
use librauth_auth::session::SessionRevoker;
use librauth_core::config::AppConfig;
use librauth_core::error::AppError;
use librauth_core::result::AppResult;
use librauth_database::connection::DatabasePool;
use librauth_database::repositories::user::UserRepository;
use librauth_registry::RegistryManager;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the Axum application from pre-constructed collaborators.
///
/// Split out from [`run_server`] so tests can assemble an app over
/// in-memory stores without binding a socket.
pub fn build_app(
    config: Arc<AppConfig>,
    registry: Arc<RegistryManager>,
    users: Arc<dyn CredentialStore>,
) -> axum::Router {
    let issuer = Arc::new(TokenIssuer::new(&config.auth, Arc::clone(&registry)));
    let validator = Arc::new(TokenValidator::new(&config.auth, Arc::clone(&registry)));
    let revoker = Arc::new(SessionRevoker::new(Arc::clone(&registry)));

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&users),
        PasswordHasher::new(),
        issuer,
        Arc::clone(&validator),
        revoker,
    ));

    let state = AppState {
        config,
        registry,
        users,
        validator,
        auth_service,
    };

    build_router(state)
}

/// Connects the backing stores, assembles the app, and serves it until a
/// shutdown signal arrives.
pub async fn run_server(config: AppConfig) -> AppResult<()> {
    info!("Starting librauth v{}", env!("CARGO_PKG_VERSION"));

    // Credential Store: connection pool + migrations
    let db_pool = DatabasePool::connect(&config.database).await?;
    librauth_database::migration::run_migrations(db_pool.pool()).await?;

    // Session Registry
    info!(provider = %config.registry.provider, "Initializing Session Registry");
    let registry = Arc::new(RegistryManager::new(&config.registry).await?);

    let users: Arc<dyn CredentialStore> =
        Arc::new(UserRepository::new(db_pool.pool().clone()));

    let config = Arc::new(config);
    let app = build_app(Arc::clone(&config), registry, users);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("librauth server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db_pool.close().await;
    info!("librauth server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
