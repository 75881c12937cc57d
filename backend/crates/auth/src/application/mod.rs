//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod sign_in;
pub mod verify_init_data;

// Re-exports
pub use check_session::CheckSessionUseCase;
pub use config::AuthConfig;
pub use sign_in::{SignInOutput, SignInUseCase};
pub use verify_init_data::{IdentityCheck, VerifyInitDataUseCase};
