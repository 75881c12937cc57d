//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::GatewayAppState;
pub use router::{gateway_router, gateway_router_generic};
