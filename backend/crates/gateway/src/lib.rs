//! Gateway (Mini-App Relay) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Route policies, relay envelopes, backend port
//! - `application/` - Relay use case and configuration
//! - `infra/` - reqwest implementation of the backend port
//! - `presentation/` - HTTP handlers, router
//!
//! ## Security Model
//! - Init data is verified before anything reaches the backend
//! - Requests without identity are rejected with no backend call
//! - Transport failures surface as a fixed localized message, never raw error text
//! - No retries: POST relays are forwarded exactly once

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use infra::http::HttpBackend;
pub use presentation::router::{gateway_router, gateway_router_generic};

// Re-export the shared error classification
pub use kernel::error::kind::ErrorKind;

pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::backend::*;
    pub use crate::domain::envelope::*;
    pub use crate::domain::policy::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}
