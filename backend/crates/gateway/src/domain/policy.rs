//! Route Policy
//!
//! Per-route rules the relay applies before and after the backend call.

/// Attribution attached to every log line of a relayed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogContext {
    /// Mini-App screen the call originates from
    pub page: &'static str,
    pub action: &'static str,
    /// Backend path, for correlation with backend logs
    pub endpoint: &'static str,
}

/// How the inbound request body is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyPolicy {
    /// No body is forwarded
    #[default]
    None,
    /// Body must be present and valid JSON
    Required,
    /// Missing or unparseable body is replaced with `{}`
    Tolerant,
}

/// Relay policy for a single route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePolicy {
    /// Reject requests without init data
    pub require_auth: bool,
    /// Extra query parameters appended to the backend URL
    pub query_params: Vec<(String, String)>,
    pub log_context: LogContext,
    pub body: BodyPolicy,
}

impl RoutePolicy {
    /// Authenticated route without a body
    pub fn authenticated(log_context: LogContext) -> Self {
        Self {
            require_auth: true,
            query_params: Vec::new(),
            log_context,
            body: BodyPolicy::None,
        }
    }

    pub fn with_body(mut self, body: BodyPolicy) -> Self {
        self.body = body;
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((key.into(), value.into()));
        self
    }
}
