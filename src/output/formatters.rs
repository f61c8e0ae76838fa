//! Formatting helpers for dates and token lifetimes

use chrono::{DateTime, NaiveDate, Utc};

/// Date as `YYYY-MM-DD`, or `--` when unknown
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "--".to_string())
}

/// Describe a token expiry relative to `now`.
///
/// # Example output
/// - `expires in 2h 15m`
/// - `expired 3d ago`
pub fn format_expiry(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let remaining = expires_at.signed_duration_since(now);

    if remaining.num_seconds() > 0 {
        format!("expires in {}", format_span(remaining.num_seconds()))
    } else {
        format!("expired {} ago", format_span(-remaining.num_seconds()))
    }
}

fn format_span(secs: i64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3600;
    let mins = (secs % 3600) / 60;

    if days > 0 {
        format!("{}d", days)
    } else if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else if mins > 0 {
        format!("{}m", mins)
    } else {
        format!("{}s", secs)
    }
}
