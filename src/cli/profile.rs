//! Profile command implementations
//!
//! Both commands enter `/profile` through the router, so the route guard has
//! to confirm the session with the server first.

use colored::Colorize;

use crate::cli::args::{GlobalOptions, ProfileUpdateArgs};
use crate::cli::{CommandContext, OutputFormat, spinner};
use crate::error::{ApiError, Error, Result};
use crate::models::ProfileDisplay;
use crate::navigation::{Navigation, routes};
use crate::output;

/// Show the profile stored on the server
pub async fn show(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    enter_profile(&ctx).await?;

    let progress = spinner("Fetching profile...");
    let result = ctx.session.get_profile().await;
    progress.finish_and_clear();

    output::print(&ProfileDisplay::from(&result?), ctx.format)
}

/// Update profile fields
pub async fn update(opts: &GlobalOptions, fields: &ProfileUpdateArgs) -> Result<()> {
    if fields.is_empty() {
        return Err(Error::Other(
            "Nothing to update. Pass at least one field, e.g. --full-name".to_string(),
        ));
    }

    let ctx = CommandContext::new(opts)?;
    enter_profile(&ctx).await?;

    let mut changes = ctx.session.state().subscribe();
    changes.latest();

    let progress = spinner("Updating profile...");
    let result = async {
        let current = ctx.session.get_profile().await?;
        ctx.session.update_profile(fields.apply(current)).await
    }
    .await;
    progress.finish_and_clear();
    let response = result?;

    if !response.success {
        return Err(Error::Rejected(
            response.message_or("Profile update failed").to_string(),
        ));
    }

    // The session published what was sent; prefer the server's copy if any
    let updated = response
        .data
        .clone()
        .or_else(|| changes.latest().flatten())
        .ok_or_else(|| ApiError::InvalidResponse("No profile in response".to_string()))?;

    if ctx.format == OutputFormat::Pretty {
        println!(
            "{} {}",
            "✓".green(),
            response.message_or("Profile updated")
        );
    }
    output::print(&ProfileDisplay::from(&updated), ctx.format)
}

async fn enter_profile(ctx: &CommandContext) -> Result<()> {
    match ctx.router().open(routes::PROFILE).await? {
        Navigation::Entered(_) => Ok(()),
        Navigation::Redirected(to) => {
            log::debug!("Profile guarded; redirected to {}", to);
            Err(ApiError::Unauthorized(None).into())
        }
    }
}
