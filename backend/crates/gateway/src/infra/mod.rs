//! Infrastructure Layer
//!
//! Outbound HTTP implementation of the backend port.

pub mod http;

pub use http::HttpBackend;
