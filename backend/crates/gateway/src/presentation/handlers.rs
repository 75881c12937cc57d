//! HTTP Handlers
//!
//! One handler per relayed route. Each builds its policy, delegates to the
//! relay use case and renders the route's envelope.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use auth::AuthConfig;
use platform::client::extract_identity;

use crate::application::RelayUseCase;
use crate::domain::backend::BackendClient;
use crate::domain::envelope::{EnvelopeShape, ProxyRequest, ProxyResponse, messages};
use crate::domain::policy::{BodyPolicy, LogContext, RoutePolicy};
use crate::presentation::dto::ReferralSummaryQuery;

/// Backend paths
pub mod paths {
    pub const ORDERS_CREATE: &str = "/v1/orders/create";
    pub const USER_AUTORENEWAL: &str = "/v1/user/autorenewal";
    pub const USER_REFERRALS: &str = "/v1/user/referrals";
    pub const REFERRAL_SUMMARY: &str = "/v1/referral/summary";
    pub const USER_BILLING: &str = "/v1/user/billing";
}

/// Shared state for gateway handlers
pub struct GatewayAppState<B>
where
    B: BackendClient + Send + Sync + 'static,
{
    pub backend: Arc<B>,
    pub auth_config: Arc<AuthConfig>,
}

impl<B> Clone for GatewayAppState<B>
where
    B: BackendClient + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            auth_config: self.auth_config.clone(),
        }
    }
}

async fn relay<B>(
    state: &GatewayAppState<B>,
    method: Method,
    headers: &HeaderMap,
    body: Bytes,
    policy: RoutePolicy,
    shape: EnvelopeShape,
) -> Response
where
    B: BackendClient + Send + Sync + 'static,
{
    let request = ProxyRequest {
        method,
        path: policy.log_context.endpoint.to_string(),
        body,
        identity: extract_identity(headers),
    };

    let use_case = RelayUseCase::new(state.backend.clone(), state.auth_config.clone());
    let response = use_case.handle(request, &policy).await;

    render(shape, &response)
}

fn render(shape: EnvelopeShape, response: &ProxyResponse) -> Response {
    let (status, body) = shape.render(response);
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(body)).into_response()
}

// ============================================================================
// Orders
// ============================================================================

/// POST /api/orders/create
pub async fn create_order<B>(
    State(state): State<GatewayAppState<B>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response
where
    B: BackendClient + Send + Sync + 'static,
{
    let policy = RoutePolicy::authenticated(LogContext {
        page: "checkout",
        action: "create_order",
        endpoint: paths::ORDERS_CREATE,
    })
    .with_body(BodyPolicy::Required);

    relay(&state, Method::POST, &headers, body, policy, EnvelopeShape::Passthrough).await
}

// ============================================================================
// User
// ============================================================================

/// GET /api/user/autorenewal
pub async fn get_autorenewal<B>(
    State(state): State<GatewayAppState<B>>,
    headers: HeaderMap,
) -> Response
where
    B: BackendClient + Send + Sync + 'static,
{
    let policy = RoutePolicy::authenticated(LogContext {
        page: "subscription",
        action: "load_autorenewal",
        endpoint: paths::USER_AUTORENEWAL,
    });

    relay(&state, Method::GET, &headers, Bytes::new(), policy, EnvelopeShape::Flatten).await
}

/// POST /api/user/autorenewal
pub async fn set_autorenewal<B>(
    State(state): State<GatewayAppState<B>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response
where
    B: BackendClient + Send + Sync + 'static,
{
    let policy = RoutePolicy::authenticated(LogContext {
        page: "subscription",
        action: "toggle_autorenewal",
        endpoint: paths::USER_AUTORENEWAL,
    })
    .with_body(BodyPolicy::Tolerant);

    relay(&state, Method::POST, &headers, body, policy, EnvelopeShape::Flatten).await
}

/// GET /api/user/referrals
pub async fn get_referrals<B>(
    State(state): State<GatewayAppState<B>>,
    headers: HeaderMap,
) -> Response
where
    B: BackendClient + Send + Sync + 'static,
{
    let policy = RoutePolicy::authenticated(LogContext {
        page: "referrals",
        action: "load_referrals",
        endpoint: paths::USER_REFERRALS,
    });

    relay(&state, Method::GET, &headers, Bytes::new(), policy, EnvelopeShape::Flatten).await
}

/// GET /api/user/billing
pub async fn get_billing<B>(
    State(state): State<GatewayAppState<B>>,
    headers: HeaderMap,
) -> Response
where
    B: BackendClient + Send + Sync + 'static,
{
    let policy = RoutePolicy::authenticated(LogContext {
        page: "billing",
        action: "load_billing",
        endpoint: paths::USER_BILLING,
    });

    relay(&state, Method::GET, &headers, Bytes::new(), policy, EnvelopeShape::Flatten).await
}

// ============================================================================
// Referral
// ============================================================================

/// Field the referral summary is wrapped in
const SUMMARY_FIELD: &str = "summary";

/// GET /api/referral/summary?contest_id=...
pub async fn referral_summary<B>(
    State(state): State<GatewayAppState<B>>,
    headers: HeaderMap,
    Query(query): Query<ReferralSummaryQuery>,
) -> Response
where
    B: BackendClient + Send + Sync + 'static,
{
    let shape = EnvelopeShape::Wrap(SUMMARY_FIELD);

    let contest_id = match query.contest_id.filter(|id| !id.trim().is_empty()) {
        Some(id) => id,
        None => {
            tracing::info!(page = "referrals", action = "load_summary", "Missing contest_id");
            return render(
                shape,
                &ProxyResponse::failure(400, messages::MISSING_PARAMETER),
            );
        }
    };

    let policy = RoutePolicy::authenticated(LogContext {
        page: "referrals",
        action: "load_summary",
        endpoint: paths::REFERRAL_SUMMARY,
    })
    .with_query("contest_id", contest_id);

    relay(&state, Method::GET, &headers, Bytes::new(), policy, shape).await
}
