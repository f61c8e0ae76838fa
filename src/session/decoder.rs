//! Bearer token decoding
//!
//! Reads the claims segment of a `header.payload.signature` token. The
//! signature is never verified here; the backend's `validateToken` endpoint
//! is the authority on whether a token is still good.

use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::client::models::{DEFAULT_PHOTO_URL, UserIdentity, parse_birth_date, value_text};
use crate::error::DecodeError;

/// Decode the identity carried in `token`
pub fn decode(token: &str) -> Result<UserIdentity, DecodeError> {
    let claims = claims(token)?;
    Ok(identity_from_claims(&claims))
}

/// Expiry instant from the `exp` claim, if the token carries one
pub fn expiry(token: &str) -> Option<DateTime<Utc>> {
    let claims = claims(token).ok()?;
    let exp = claims.get("exp")?;
    let secs = exp.as_i64().or_else(|| exp.as_f64().map(|f| f as i64))?;
    DateTime::from_timestamp(secs, 0)
}

/// Decode, logging and discarding failures
pub fn decode_or_log(token: &str) -> Option<UserIdentity> {
    match decode(token) {
        Ok(user) => Some(user),
        Err(e) => {
            log::warn!("Failed to decode session token: {}", e);
            None
        }
    }
}

fn claims(token: &str) -> Result<Map<String, Value>, DecodeError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(DecodeError::Malformed(parts.len()));
    }

    let payload = general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|e| DecodeError::Base64(e.to_string()))?;

    match serde_json::from_slice::<Value>(&payload) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(DecodeError::Json(format!("expected object, got {}", other))),
        Err(e) => Err(DecodeError::Json(e.to_string())),
    }
}

fn identity_from_claims(claims: &Map<String, Value>) -> UserIdentity {
    let text = |key: &str| claims.get(key).and_then(value_text);

    // An absent date defaults to today; a present but unreadable one is unknown.
    let birth_date = match claims.get("fechaNacimiento") {
        None | Some(Value::Null) => Some(Utc::now().date_naive()),
        Some(Value::String(s)) if s.is_empty() => Some(Utc::now().date_naive()),
        Some(value) => parse_birth_date(value),
    };

    UserIdentity {
        username: text("userName").unwrap_or_default(),
        email: text("email").unwrap_or_default(),
        full_name: text("nombreCompleto").unwrap_or_default(),
        photo_url: text("fotoUrl").unwrap_or_else(|| DEFAULT_PHOTO_URL.to_string()),
        phone_number: text("telefono").unwrap_or_default(),
        birth_date,
    }
}
