//! Token Session Manager: issuing, validating, refreshing, introspecting,
//! and revoking signed tokens against the Session Registry.

pub mod context;
pub mod credentials;
pub mod jwt;
pub mod password;
pub mod service;
pub mod session;

pub use context::RequestContext;
pub use credentials::{CredentialStore, NewUser};
pub use jwt::{Claims, TokenIssuer, TokenValidator};
pub use service::AuthService;
pub use session::SessionRevoker;
