//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use std::sync::Arc;

use platform::cookie::{extract_cookie, set_cookie_header};

use crate::application::config::AuthConfig;
use crate::application::{CheckSessionUseCase, SignInUseCase};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{AdminSignInRequest, AdminSignInResponse, AdminStatusResponse};

/// Shared state for admin handlers
#[derive(Clone)]
pub struct AdminAppState {
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/admin/auth
pub async fn sign_in(
    State(state): State<AdminAppState>,
    payload: Result<Json<AdminSignInRequest>, JsonRejection>,
) -> Result<Response, Response> {
    let Json(req) = payload.map_err(|e| AppError::from(e).into_response())?;

    let use_case = SignInUseCase::new(state.config.clone());
    let output = use_case
        .execute(req.password.as_deref())
        .map_err(IntoResponse::into_response)?;

    let cookie = set_cookie_header(&state.config.session_cookie(), &output.session_token)
        .ok_or_else(|| {
            AuthError::Internal("Session token is not a valid header value".into()).into_response()
        })?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(AdminSignInResponse { success: true }),
    )
        .into_response())
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/admin/auth
pub async fn session_status(
    State(state): State<AdminAppState>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse> {
    let token = extract_cookie(&headers, &state.config.session_cookie_name);

    let use_case = CheckSessionUseCase::new(state.config.clone());
    let authenticated = use_case.is_valid(token.as_deref());

    let status = if authenticated {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };

    Ok((status, Json(AdminStatusResponse { authenticated })))
}
