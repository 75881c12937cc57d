//! Domain Services
//!
//! Pure verification logic for Telegram Mini-App init data.

use chrono::{DateTime, Utc};
use platform::crypto::{constant_time_eq, hmac_sha256, to_hex};
use std::time::Duration;

use super::init_data::{InitData, InitDataError, TelegramUser, USER_FIELD, build_check_string};

/// Fixed key Telegram uses to derive the per-bot secret
pub const WEB_APP_DATA_KEY: &[u8] = b"WebAppData";

/// Derive the HMAC secret for a bot: `HMAC-SHA256(key = "WebAppData", msg = bot_token)`
pub fn derive_secret_key(bot_token: &str) -> [u8; 32] {
    hmac_sha256(WEB_APP_DATA_KEY, bot_token.as_bytes())
}

/// Lowercase hex signature of a check string
pub fn compute_hash(check_string: &str, bot_token: &str) -> String {
    let secret = derive_secret_key(bot_token);
    to_hex(&hmac_sha256(&secret, check_string.as_bytes()))
}

/// Verify init data against the current wall clock
pub fn verify(
    raw: &str,
    bot_token: &str,
    max_age: Option<Duration>,
) -> Result<InitData, InitDataError> {
    verify_at(raw, bot_token, max_age, Utc::now())
}

/// Verify init data as of `now`
///
/// Steps: parse, recompute the signature over the check string, compare
/// in constant time, enforce `max_age` against `auth_date`, then decode
/// the embedded user.
///
/// ## Errors
/// * `Malformed` - unparsable input, or `auth_date`/`user` unusable
/// * `SignatureMismatch` - the hash does not match
/// * `Stale` - `auth_date` is older than `max_age`
pub fn verify_at(
    raw: &str,
    bot_token: &str,
    max_age: Option<Duration>,
    now: DateTime<Utc>,
) -> Result<InitData, InitDataError> {
    let mut init_data = InitData::parse(raw)?;

    let expected = compute_hash(&init_data.check_string(), bot_token);
    if !constant_time_eq(expected.as_bytes(), init_data.hash().as_bytes()) {
        return Err(InitDataError::SignatureMismatch);
    }

    if let Some(max_age) = max_age {
        let auth_date = init_data.auth_date().ok_or(InitDataError::Malformed)?;
        let age_secs = now.timestamp().saturating_sub(auth_date);
        // A clock-skewed future auth_date has a negative age and passes
        if age_secs > 0 && age_secs as u64 > max_age.as_secs() {
            return Err(InitDataError::Stale);
        }
    }

    if let Some(user_json) = init_data.get(USER_FIELD) {
        let user: TelegramUser =
            serde_json::from_str(user_json).map_err(|_| InitDataError::Malformed)?;
        init_data.user = Some(user);
    }

    Ok(init_data)
}

/// Produce a signed init data string for the given fields
///
/// Mirrors what Telegram does when it launches a Mini-App. Used by tests
/// and local tooling that need to mint valid identities.
pub fn sign_init_data(pairs: &[(&str, &str)], bot_token: &str) -> String {
    let check_string = build_check_string(pairs.iter().copied());
    let hash = compute_hash(&check_string, bot_token);

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs.iter().filter(|(k, _)| *k != super::init_data::HASH_FIELD) {
        serializer.append_pair(key, value);
    }
    serializer.append_pair(super::init_data::HASH_FIELD, &hash);
    serializer.finish()
}
