//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, HMAC-SHA256, Base64, hex)
//! - Cookie management
//! - Identity header extraction for inbound requests

pub mod client;
pub mod cookie;
pub mod crypto;
