//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Init data, admin session, verification services
//! - `application/` - Use cases and configuration
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Telegram Mini-App init data verification (HMAC-SHA256, max age)
//! - Single-role admin sign-in with a shared password
//! - Stateless admin sessions carried in an HMAC-signed cookie
//!
//! ## Security Model
//! - Signatures and password digests compared in constant time
//! - Admin session cookie is HttpOnly, SameSite=Strict and Secure by default
//! - Failures never reveal which check failed to the caller

pub mod application;
pub mod domain;
pub mod error;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::{IdentityCheck, VerifyInitDataUseCase};
pub use error::{AuthError, AuthResult};
pub use presentation::router::admin_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::admin_session::*;
    pub use crate::domain::init_data::*;
    pub use crate::presentation::dto::*;
}

pub mod crypto {
    pub use crate::domain::services::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}
