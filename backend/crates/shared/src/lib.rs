//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" shared by the gateway crates:
//! - The error classification used to pick HTTP status codes
//! - The unified application error and its failure envelope
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
