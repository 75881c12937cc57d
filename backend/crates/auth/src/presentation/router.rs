//! Admin Router

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::presentation::handlers::{self, AdminAppState};

/// Create the admin router
///
/// Mounts `/admin/auth`: POST signs in, GET reports session status.
pub fn admin_router(config: Arc<AuthConfig>) -> Router {
    let state = AdminAppState { config };

    Router::new()
        .route(
            "/admin/auth",
            get(handlers::session_status).post(handlers::sign_in),
        )
        .with_state(state)
}
