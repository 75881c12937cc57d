//! Domain Layer - Relay rules and ports
//!
//! This layer contains:
//! - Route policies (auth requirement, body handling, log context)
//! - Relay envelopes (normalized outcome and per-route shapes)
//! - The backend port (interface)

pub mod backend;
pub mod envelope;
pub mod policy;
