//! Domain Layer
//!
//! Contains the init data value objects, the admin session entity, and the
//! pure verification services.

pub mod admin_session;
pub mod init_data;
pub mod services;

// Re-exports
pub use admin_session::AdminSession;
pub use init_data::{InitData, InitDataError, TelegramUser};
