//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

// ============================================================================
// Admin Sign In
// ============================================================================

/// Admin sign in request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminSignInRequest {
    #[serde(default)]
    pub password: Option<String>,
}

/// Admin sign in response
#[derive(Debug, Clone, Serialize)]
pub struct AdminSignInResponse {
    pub success: bool,
}

// ============================================================================
// Session Status
// ============================================================================

/// Admin session status response
#[derive(Debug, Clone, Serialize)]
pub struct AdminStatusResponse {
    pub authenticated: bool,
}
