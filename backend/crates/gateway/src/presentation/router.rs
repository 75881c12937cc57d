//! Gateway Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use auth::AuthConfig;

use crate::domain::backend::BackendClient;
use crate::infra::http::HttpBackend;
use crate::presentation::handlers::{self, GatewayAppState};

/// Create the gateway router with the HTTP backend
pub fn gateway_router(backend: HttpBackend, auth_config: Arc<AuthConfig>) -> Router {
    gateway_router_generic(backend, auth_config)
}

/// Create a generic gateway router for any backend implementation
pub fn gateway_router_generic<B>(backend: B, auth_config: Arc<AuthConfig>) -> Router
where
    B: BackendClient + Send + Sync + 'static,
{
    let state = GatewayAppState {
        backend: Arc::new(backend),
        auth_config,
    };

    Router::new()
        .route("/orders/create", post(handlers::create_order::<B>))
        .route(
            "/user/autorenewal",
            get(handlers::get_autorenewal::<B>).post(handlers::set_autorenewal::<B>),
        )
        .route("/user/referrals", get(handlers::get_referrals::<B>))
        .route("/referral/summary", get(handlers::referral_summary::<B>))
        .route("/user/billing", get(handlers::get_billing::<B>))
        .with_state(state)
}
