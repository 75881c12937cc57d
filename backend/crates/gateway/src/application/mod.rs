//! Application Layer - Use cases
//!
//! Orchestrates domain logic with the backend port.

pub mod config;
pub mod relay;

pub use config::GatewayConfig;
pub use relay::RelayUseCase;
