//! Display models for session and profile output
//!
//! Display models turn session data into what the CLI prints: a field table
//! for `pretty`, a serializable record for `json`.

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::client::models::UserIdentity;
use crate::error::Result;
use crate::output::Formattable;
use crate::output::formatters::{format_date, format_expiry};
use crate::output::json::format_json;
use crate::output::table::{Field, format_table};

/// A user profile
#[derive(Debug, Clone, Serialize)]
pub struct ProfileDisplay {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub photo_url: String,
    pub phone_number: String,
    pub birth_date: Option<String>,
}

impl From<&UserIdentity> for ProfileDisplay {
    fn from(user: &UserIdentity) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            photo_url: user.photo_url.clone(),
            phone_number: user.phone_number.clone(),
            birth_date: user.birth_date.map(|d| format_date(Some(d))),
        }
    }
}

impl ProfileDisplay {
    fn fields(&self) -> Vec<Field> {
        vec![
            Field::new("Username", self.username.as_str()),
            Field::new("Email", self.email.as_str()),
            Field::new("Full name", self.full_name.as_str()),
            Field::new("Phone", self.phone_number.as_str()),
            Field::new("Birth date", self.birth_date.clone().unwrap_or_default()),
            Field::new("Photo", self.photo_url.as_str()),
        ]
    }
}

impl Formattable for ProfileDisplay {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty => Ok(format_table(&self.fields())),
            OutputFormat::Json => Ok(format_json(self)?),
        }
    }
}

/// Local session status
#[derive(Debug, Clone, Serialize)]
pub struct StatusDisplay {
    /// Where the token is stored, if storage is available
    pub storage: Option<String>,
    pub api_url: String,
    /// A token is stored (not necessarily valid)
    pub authenticated: bool,
    pub user: Option<ProfileDisplay>,
    pub expires_at: Option<DateTime<Utc>>,
    /// Backend verdict, when `--verify` was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

impl StatusDisplay {
    fn pretty(&self) -> String {
        let mut lines = vec![format!("{}\n", "StockNet Session Status".bold())];

        match &self.storage {
            Some(path) => lines.push(format!("Storage: {}", path.cyan())),
            None => lines.push(format!("{} No storage available; sessions are not kept", "⚠".yellow())),
        }
        lines.push(format!("API: {}", self.api_url.cyan()));
        lines.push(String::new());

        if !self.authenticated {
            lines.push(format!("{} Not signed in", "✗".red()));
            lines.push("  → Run 'stocknet login' to sign in".to_string());
            return lines.join("\n");
        }

        match &self.user {
            Some(user) => {
                let name = if user.full_name.is_empty() {
                    &user.username
                } else {
                    &user.full_name
                };
                lines.push(format!("{} Signed in as {} <{}>", "✓".green(), name.bold(), user.email));
            }
            None => lines.push(format!(
                "{} Token stored but it carries no readable identity",
                "⚠".yellow()
            )),
        }

        if let Some(expires_at) = self.expires_at {
            let text = format_expiry(expires_at, Utc::now());
            if expires_at <= Utc::now() {
                lines.push(format!("{} Token {}", "⚠".yellow(), text));
            } else {
                lines.push(format!("{} Token {}", "✓".green(), text));
            }
        }

        match self.verified {
            Some(true) => lines.push(format!("{} Server accepted the session", "✓".green())),
            Some(false) => lines.push(format!(
                "{} Server rejected the session; run 'stocknet login'",
                "✗".red()
            )),
            None => {}
        }

        lines.join("\n")
    }
}

impl Formattable for StatusDisplay {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty => Ok(self.pretty()),
            OutputFormat::Json => Ok(format_json(self)?),
        }
    }
}
