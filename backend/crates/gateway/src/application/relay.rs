//! Relay Use Case
//!
//! Validate → resolve identity → forward → normalize, for one inbound call.

use std::sync::Arc;

use auth::{AuthConfig, AuthError, VerifyInitDataUseCase};
use serde_json::{Value, json};

use crate::domain::backend::{BackendClient, BackendReply, BackendRequest, TransportError};
use crate::domain::envelope::{ProxyRequest, ProxyResponse, backend_error_message, messages};
use crate::domain::policy::{BodyPolicy, RoutePolicy};
use crate::error::{GatewayError, GatewayResult};

/// Relay use case
pub struct RelayUseCase<B>
where
    B: BackendClient + Send + Sync + 'static,
{
    backend: Arc<B>,
    auth_config: Arc<AuthConfig>,
}

impl<B> RelayUseCase<B>
where
    B: BackendClient + Send + Sync + 'static,
{
    pub fn new(backend: Arc<B>, auth_config: Arc<AuthConfig>) -> Self {
        Self {
            backend,
            auth_config,
        }
    }

    /// Relay one request; every failure is folded into the response
    pub async fn handle(&self, request: ProxyRequest, policy: &RoutePolicy) -> ProxyResponse {
        let ctx = policy.log_context;

        match self.relay(request, policy).await {
            Ok(response) => {
                tracing::info!(
                    page = ctx.page,
                    action = ctx.action,
                    endpoint = ctx.endpoint,
                    status = response.status,
                    "Relay succeeded"
                );
                response
            }
            Err(err) => {
                err.log(ctx.page, ctx.action, ctx.endpoint);
                err.to_proxy_response()
            }
        }
    }

    async fn relay(&self, request: ProxyRequest, policy: &RoutePolicy) -> GatewayResult<ProxyResponse> {
        if policy.require_auth && request.identity.is_none() {
            return Err(AuthError::MissingInitData.into());
        }
        let body = parse_body(&request.body, policy.body)?;

        let authorization = match request.identity {
            Some(identity) => {
                VerifyInitDataUseCase::new(self.auth_config.clone()).execute(&identity.raw)?;
                Some(identity.raw)
            }
            None => None,
        };

        let backend_request = BackendRequest {
            method: request.method,
            path: request.path,
            query: policy.query_params.clone(),
            body,
            authorization,
        };

        let reply = self.backend.send(backend_request).await?;
        normalize(reply)
    }
}

/// Interpret the inbound body according to the route's policy
pub fn parse_body(raw: &[u8], policy: BodyPolicy) -> GatewayResult<Option<Value>> {
    match policy {
        BodyPolicy::None => Ok(None),
        BodyPolicy::Required => {
            if raw.iter().all(u8::is_ascii_whitespace) {
                return Err(GatewayError::Validation(messages::INVALID_BODY));
            }
            serde_json::from_slice(raw)
                .map(Some)
                .map_err(|_| GatewayError::Validation(messages::INVALID_BODY))
        }
        BodyPolicy::Tolerant => Ok(Some(serde_json::from_slice(raw).unwrap_or_else(|_| json!({})))),
    }
}

/// Turn a backend reply into a relay outcome
pub fn normalize(reply: BackendReply) -> GatewayResult<ProxyResponse> {
    let empty = reply.body.iter().all(u8::is_ascii_whitespace);

    if reply.is_success() {
        let data = if empty {
            json!({})
        } else {
            serde_json::from_slice(&reply.body)
                .map_err(|e| TransportError::Body(format!("invalid JSON: {e}")))?
        };
        return Ok(ProxyResponse::ok(reply.status, data));
    }

    let body: Value = serde_json::from_slice(&reply.body).unwrap_or_else(|_| json!({}));
    let message =
        backend_error_message(&body).unwrap_or_else(|| messages::BACKEND_FALLBACK.to_string());

    Err(GatewayError::Backend {
        status: reply.status,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(status: u16, body: &str) -> BackendReply {
        BackendReply {
            status,
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_parse_body_policies() {
        assert_eq!(parse_body(b"{\"a\":1}", BodyPolicy::None).unwrap(), None);

        assert_eq!(
            parse_body(b"{\"a\":1}", BodyPolicy::Required).unwrap(),
            Some(json!({ "a": 1 }))
        );
        assert!(matches!(
            parse_body(b"", BodyPolicy::Required),
            Err(GatewayError::Validation(_))
        ));
        assert!(matches!(
            parse_body(b"{oops", BodyPolicy::Required),
            Err(GatewayError::Validation(_))
        ));

        assert_eq!(
            parse_body(b"{oops", BodyPolicy::Tolerant).unwrap(),
            Some(json!({}))
        );
        assert_eq!(parse_body(b"", BodyPolicy::Tolerant).unwrap(), Some(json!({})));
        assert_eq!(
            parse_body(b"{\"enabled\":false}", BodyPolicy::Tolerant).unwrap(),
            Some(json!({ "enabled": false }))
        );
    }

    #[test]
    fn test_normalize_success() {
        let response = normalize(reply(201, r#"{"orderId":"o1"}"#)).unwrap();
        assert_eq!(response, ProxyResponse::ok(201, json!({ "orderId": "o1" })));

        let response = normalize(reply(204, "")).unwrap();
        assert_eq!(response.data, Some(json!({})));
    }

    #[test]
    fn test_normalize_success_with_garbage_is_transport_error() {
        let err = normalize(reply(200, "<html>")).unwrap_err();
        assert!(matches!(err, GatewayError::Transport(TransportError::Body(_))));
        assert_eq!(err.to_proxy_response().status, 500);
    }

    #[test]
    fn test_normalize_failure_message_sources() {
        let err = normalize(reply(404, r#"{"error":"not found"}"#)).unwrap_err();
        assert_eq!(err.to_proxy_response(), ProxyResponse::failure(404, "not found"));

        let err = normalize(reply(422, r#"{"detail":"bad tariff"}"#)).unwrap_err();
        assert_eq!(err.public_message(), "bad tariff");

        let err = normalize(reply(502, "Bad Gateway")).unwrap_err();
        assert_eq!(
            err.to_proxy_response(),
            ProxyResponse::failure(502, messages::BACKEND_FALLBACK)
        );
    }
}
