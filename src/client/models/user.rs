//! User identity model
//!
//! The same record is decoded from the session token, returned by
//! `Auth/profile` and sent to `Auth/updateProfile`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Photo shown when the user has not uploaded one
pub const DEFAULT_PHOTO_URL: &str = "https://i.pravatar.cc/150?img=3";

/// Authenticated user's identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    #[serde(rename = "userName", alias = "UserName", default, deserialize_with = "text")]
    pub username: String,

    #[serde(alias = "Email", default, deserialize_with = "text")]
    pub email: String,

    #[serde(
        rename = "nombreCompleto",
        alias = "NombreCompleto",
        default,
        deserialize_with = "text"
    )]
    pub full_name: String,

    #[serde(
        rename = "fotoPerfilUrl",
        alias = "FotoPerfilUrl",
        default = "default_photo_url",
        deserialize_with = "photo_url"
    )]
    pub photo_url: String,

    #[serde(
        rename = "numeroTelefono",
        alias = "NumeroTelefono",
        default,
        deserialize_with = "text"
    )]
    pub phone_number: String,

    /// `None` when the server sent a date that could not be read
    #[serde(
        rename = "fechaNacimiento",
        alias = "FechaNacimiento",
        default,
        deserialize_with = "birth_date"
    )]
    pub birth_date: Option<NaiveDate>,
}

impl Default for UserIdentity {
    fn default() -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            full_name: String::new(),
            photo_url: default_photo_url(),
            phone_number: String::new(),
            birth_date: None,
        }
    }
}

impl UserIdentity {
    /// Name to greet the user with
    pub fn display_name(&self) -> &str {
        if !self.full_name.is_empty() {
            &self.full_name
        } else if !self.username.is_empty() {
            &self.username
        } else {
            &self.email
        }
    }
}

fn default_photo_url() -> String {
    DEFAULT_PHOTO_URL.to_string()
}

/// Text content of a loosely-typed JSON value; null and non-scalars read as absent
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parse a birth date from a date string, timestamp string or epoch milliseconds
pub fn parse_birth_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => parse_date_str(s.trim()),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|dt| dt.date_naive()),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    // .NET serializes DateTime without an offset
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value_text(&value).unwrap_or_default())
}

fn photo_url<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value_text(&value).unwrap_or_else(default_photo_url))
}

fn birth_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(parse_birth_date(&value))
}
