//! Client identification utilities
//!
//! Common functions for locating the identity material a Mini-App client
//! sends with each request.

use axum::http::{HeaderMap, header};

/// Header carrying the raw Telegram init data (preferred)
pub const INIT_DATA_HEADER: &str = "x-telegram-init-data";

/// Authorization scheme Telegram Mini-Apps conventionally use
const TMA_SCHEME: &str = "tma ";

/// Where the identity material was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    InitDataHeader,
    Authorization,
}

/// Raw identity material taken from an inbound request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityMaterial {
    /// Raw init data string, exactly as the client sent it
    pub raw: String,
    pub source: IdentitySource,
}

/// Extract identity material from request headers
///
/// `X-Telegram-Init-Data` wins over `Authorization`. An optional `tma `
/// scheme prefix on `Authorization` is stripped. Empty values count as
/// absent.
///
/// ## Returns
/// * `Some(IdentityMaterial)` - a non-empty identity value was present
/// * `None` - neither header carried anything usable
pub fn extract_identity(headers: &HeaderMap) -> Option<IdentityMaterial> {
    let from_header = headers
        .get(INIT_DATA_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|raw| IdentityMaterial {
            raw: raw.to_string(),
            source: IdentitySource::InitDataHeader,
        });

    if from_header.is_some() {
        return from_header;
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::trim_start)
        .map(|v| match v.get(..TMA_SCHEME.len()) {
            Some(scheme) if scheme.eq_ignore_ascii_case(TMA_SCHEME) => v[TMA_SCHEME.len()..].trim(),
            _ => v.trim(),
        })
        .filter(|v| !v.is_empty())
        .map(|raw| IdentityMaterial {
            raw: raw.to_string(),
            source: IdentitySource::Authorization,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_init_data_header_preferred() {
        let mut headers = HeaderMap::new();
        headers.insert(INIT_DATA_HEADER, HeaderValue::from_static("a=1&hash=x"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("b=2"));

        let identity = extract_identity(&headers).unwrap();
        assert_eq!(identity.raw, "a=1&hash=x");
        assert_eq!(identity.source, IdentitySource::InitDataHeader);
    }

    #[test]
    fn test_authorization_fallback_strips_tma_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("tma query_id=1&hash=y"),
        );

        let identity = extract_identity(&headers).unwrap();
        assert_eq!(identity.raw, "query_id=1&hash=y");
        assert_eq!(identity.source, IdentitySource::Authorization);
    }

    #[test]
    fn test_authorization_without_scheme_is_raw() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("user=%7B%7D"));

        assert_eq!(extract_identity(&headers).unwrap().raw, "user=%7B%7D");
    }

    #[test]
    fn test_empty_values_are_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(INIT_DATA_HEADER, HeaderValue::from_static("  "));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("tma "));

        assert!(extract_identity(&headers).is_none());
        assert!(extract_identity(&HeaderMap::new()).is_none());
    }
}
