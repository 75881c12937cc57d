//! API DTOs (Data Transfer Objects)

use serde::Deserialize;

/// Query of GET /referral/summary
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReferralSummaryQuery {
    #[serde(default)]
    pub contest_id: Option<String>,
}
