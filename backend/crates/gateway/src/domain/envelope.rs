//! Relay Envelopes
//!
//! The normalized result of a relayed call and the per-route JSON shapes it
//! is rendered into.

use axum::body::Bytes;
use axum::http::Method;
use platform::client::IdentityMaterial;
use serde::Serialize;
use serde_json::{Map, Value, json};

/// User-facing messages (the Mini-App is Russian-language)
pub mod messages {
    /// Transport failure or unexpected error
    pub const INTERNAL_ERROR: &str = "Внутренняя ошибка сервера";
    /// Backend failed without saying why
    pub const BACKEND_FALLBACK: &str = "Не удалось выполнить запрос";
    /// Missing or rejected init data
    pub const UNAUTHORIZED: &str = "Требуется авторизация через Telegram";
    /// Required body absent or not JSON
    pub const INVALID_BODY: &str = "Некорректное тело запроса";
    /// Required query parameter absent
    pub const MISSING_PARAMETER: &str = "Не указан обязательный параметр";
}

/// Inbound request as seen by the relay
#[derive(Debug, Clone)]
pub struct ProxyRequest {
    pub method: Method,
    /// Backend path, e.g. `/v1/orders/create`
    pub path: String,
    /// Raw inbound body; interpreted according to the route's body policy
    pub body: Bytes,
    pub identity: Option<IdentityMaterial>,
}

/// Normalized relay outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProxyResponse {
    pub success: bool,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProxyResponse {
    pub fn ok(status: u16, data: Value) -> Self {
        Self {
            success: true,
            status,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(status: u16, error: impl Into<String>) -> Self {
        Self {
            success: false,
            status,
            data: None,
            error: Some(error.into()),
        }
    }

    /// Error message, falling back to the generic one
    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or(messages::BACKEND_FALLBACK)
    }
}

/// Pick the human-readable message out of a backend error body
///
/// `error` wins over `message`, which wins over `detail`. Only non-empty
/// strings count.
pub fn backend_error_message(body: &Value) -> Option<String> {
    ["error", "message", "detail"]
        .iter()
        .filter_map(|key| body.get(key).and_then(Value::as_str))
        .find(|msg| !msg.trim().is_empty())
        .map(str::to_string)
}

/// Per-route JSON shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeShape {
    /// Backend JSON verbatim on success, `{ error }` on failure
    Passthrough,
    /// `{ ok: true, ...fields }` / `{ ok: false, error }`
    Flatten,
    /// `{ ok: true, <field>: payload }` / `{ ok: false, <field>: null, error }`
    Wrap(&'static str),
}

impl EnvelopeShape {
    /// Render a relay outcome into the status and JSON body sent to the client
    pub fn render(&self, response: &ProxyResponse) -> (u16, Value) {
        let status = response.status;

        if !response.success {
            let error = response.error_message();
            let body = match self {
                EnvelopeShape::Passthrough => json!({ "error": error }),
                EnvelopeShape::Flatten => json!({ "ok": false, "error": error }),
                EnvelopeShape::Wrap(field) => {
                    let mut body = Map::new();
                    body.insert("ok".into(), Value::Bool(false));
                    body.insert((*field).into(), Value::Null);
                    body.insert("error".into(), Value::String(error.to_string()));
                    Value::Object(body)
                }
            };
            return (status, body);
        }

        let data = response.data.clone().unwrap_or_else(|| json!({}));
        let body = match self {
            EnvelopeShape::Passthrough => data,
            EnvelopeShape::Flatten => {
                let mut body = Map::new();
                body.insert("ok".into(), Value::Bool(true));
                match data {
                    Value::Object(fields) => {
                        for (key, value) in fields {
                            if key != "ok" {
                                body.insert(key, value);
                            }
                        }
                    }
                    Value::Null => {}
                    other => {
                        body.insert("data".into(), other);
                    }
                }
                Value::Object(body)
            }
            EnvelopeShape::Wrap(field) => {
                let mut body = Map::new();
                body.insert("ok".into(), Value::Bool(true));
                body.insert((*field).into(), data);
                Value::Object(body)
            }
        };
        (status, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_message_precedence() {
        assert_eq!(
            backend_error_message(&json!({ "error": "e", "message": "m", "detail": "d" })),
            Some("e".to_string())
        );
        assert_eq!(
            backend_error_message(&json!({ "message": "m", "detail": "d" })),
            Some("m".to_string())
        );
        assert_eq!(
            backend_error_message(&json!({ "detail": "d" })),
            Some("d".to_string())
        );
        assert_eq!(
            backend_error_message(&json!({ "error": "", "detail": "d" })),
            Some("d".to_string())
        );
        assert_eq!(backend_error_message(&json!({ "error": 42 })), None);
        assert_eq!(backend_error_message(&json!({})), None);
        assert_eq!(backend_error_message(&json!([1, 2])), None);
    }

    #[test]
    fn test_passthrough_render() {
        let payload = json!({ "orderId": "o1", "status": "pending" });
        let (status, body) = EnvelopeShape::Passthrough.render(&ProxyResponse::ok(201, payload.clone()));
        assert_eq!(status, 201);
        assert_eq!(body, payload);

        let (status, body) =
            EnvelopeShape::Passthrough.render(&ProxyResponse::failure(402, "no funds"));
        assert_eq!(status, 402);
        assert_eq!(body, json!({ "error": "no funds" }));
    }

    #[test]
    fn test_flatten_render() {
        let (status, body) = EnvelopeShape::Flatten
            .render(&ProxyResponse::ok(200, json!({ "enabled": true, "ok": "shadowed" })));
        assert_eq!(status, 200);
        assert_eq!(body, json!({ "ok": true, "enabled": true }));

        let (_, body) = EnvelopeShape::Flatten.render(&ProxyResponse::ok(200, json!([1])));
        assert_eq!(body, json!({ "ok": true, "data": [1] }));

        let (status, body) = EnvelopeShape::Flatten.render(&ProxyResponse::failure(500, "x"));
        assert_eq!(status, 500);
        assert_eq!(body, json!({ "ok": false, "error": "x" }));
    }

    #[test]
    fn test_wrap_render() {
        let shape = EnvelopeShape::Wrap("summary");

        let (_, body) = shape.render(&ProxyResponse::ok(200, json!({ "invited": 3 })));
        assert_eq!(body, json!({ "ok": true, "summary": { "invited": 3 } }));

        let (status, body) = shape.render(&ProxyResponse::failure(404, "not found"));
        assert_eq!(status, 404);
        assert_eq!(
            body,
            json!({ "ok": false, "summary": null, "error": "not found" })
        );
    }

    #[test]
    fn test_proxy_response_serializes_normalized_shape() {
        let value = serde_json::to_value(ProxyResponse::failure(404, "not found")).unwrap();
        assert_eq!(
            value,
            json!({ "success": false, "status": 404, "error": "not found" })
        );
    }
}
