//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use librauth_auth::credentials::CredentialStore;
use librauth_auth::jwt::validator::TokenValidator;
use librauth_auth::service::AuthService;
use librauth_core::config::AppConfig;
use librauth_registry::RegistryManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks; the registry and
/// credential store are explicit handles rather than module globals.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Session Registry handle.
    pub registry: Arc<RegistryManager>,
    /// Credential Store handle.
    pub users: Arc<dyn CredentialStore>,
    /// Token validator (used by the `AuthUser` extractor).
    pub validator: Arc<TokenValidator>,
    /// Authentication flows.
    pub auth_service: Arc<AuthService>,
}
