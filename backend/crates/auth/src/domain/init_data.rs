//! Init Data Value Objects
//!
//! Parsed representation of the signed payload a Telegram Mini-App client
//! sends with every request.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field carrying the signature
pub const HASH_FIELD: &str = "hash";
/// Field carrying the issuance time (Unix seconds)
pub const AUTH_DATE_FIELD: &str = "auth_date";
/// Field carrying the JSON-encoded user
pub const USER_FIELD: &str = "user";
/// Field carrying the inline query id
pub const QUERY_ID_FIELD: &str = "query_id";

/// Why a piece of init data was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InitDataError {
    /// Not a key/value payload, no hash, or an undecodable field
    #[error("malformed")]
    Malformed,

    /// Recomputed signature differs from the supplied hash
    #[error("signature_mismatch")]
    SignatureMismatch,

    /// `auth_date` is older than the allowed age
    #[error("stale")]
    Stale,
}

impl InitDataError {
    /// Stable reason code used in logs
    pub fn reason(&self) -> &'static str {
        match self {
            InitDataError::Malformed => "malformed",
            InitDataError::SignatureMismatch => "signature_mismatch",
            InitDataError::Stale => "stale",
        }
    }
}

/// Telegram user embedded in init data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramUser {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
    #[serde(default)]
    pub is_premium: Option<bool>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl TelegramUser {
    /// First and last name joined, falling back to the username
    pub fn display_name(&self) -> String {
        let full = match &self.last_name {
            Some(last) if !last.is_empty() => format!("{} {}", self.first_name, last),
            _ => self.first_name.clone(),
        };
        if full.trim().is_empty() {
            self.username.clone().unwrap_or_default()
        } else {
            full
        }
    }

    /// IETF language tag reported by the client, if any
    pub fn locale(&self) -> Option<&str> {
        self.language_code.as_deref()
    }
}

/// Parsed init data
///
/// Fields keep their original order and decoded values. The `user`
/// sub-structure is only populated by signature verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitData {
    fields: Vec<(String, String)>,
    pub user: Option<TelegramUser>,
}

impl InitData {
    /// Parse a raw `key=value&...` string
    ///
    /// ## Errors
    /// `Malformed` when the input is empty, a key is empty, a key repeats,
    /// or there is no non-empty `hash` field.
    pub fn parse(raw: &str) -> Result<Self, InitDataError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(InitDataError::Malformed);
        }

        let mut fields: Vec<(String, String)> = Vec::new();
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            if key.is_empty() || fields.iter().any(|(k, _)| *k == key) {
                return Err(InitDataError::Malformed);
            }
            fields.push((key.into_owned(), value.into_owned()));
        }

        let init_data = Self { fields, user: None };
        match init_data.get(HASH_FIELD) {
            Some(hash) if !hash.is_empty() => Ok(init_data),
            _ => Err(InitDataError::Malformed),
        }
    }

    /// Decoded value of a field
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All fields in their original order, `hash` included
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// The supplied signature
    pub fn hash(&self) -> &str {
        self.get(HASH_FIELD).unwrap_or_default()
    }

    pub fn query_id(&self) -> Option<&str> {
        self.get(QUERY_ID_FIELD)
    }

    /// `auth_date` as Unix seconds, if present and numeric
    pub fn auth_date(&self) -> Option<i64> {
        self.get(AUTH_DATE_FIELD)?.parse().ok()
    }

    /// Canonical HMAC input: every field except `hash`, sorted by key,
    /// rendered as `key=value` lines joined with `\n`
    pub fn check_string(&self) -> String {
        build_check_string(
            self.fields
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        )
    }
}

/// Build a check string from arbitrary pairs (the `hash` pair is skipped)
pub(crate) fn build_check_string<'a>(pairs: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    let mut pairs: Vec<(&str, &str)> = pairs.filter(|(k, _)| *k != HASH_FIELD).collect();
    pairs.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("\n")
}
