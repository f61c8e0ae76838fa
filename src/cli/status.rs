//! Status command implementation

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, spinner};
use crate::error::Result;
use crate::models::{ProfileDisplay, StatusDisplay};
use crate::output;

/// Show the local session; with `verify`, the route guard asks the server too
pub async fn run(opts: &GlobalOptions, verify: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let authenticated = ctx.session.is_authenticated();

    let verified = if verify && authenticated {
        let progress = spinner("Validating session...");
        let allowed = ctx.guard().can_activate().await;
        progress.finish_and_clear();
        Some(allowed)
    } else if verify {
        Some(false)
    } else {
        None
    };

    // A 401 while verifying clears the stored token; read the session afterwards
    let display = StatusDisplay {
        storage: ctx.storage_path().map(|p| p.display().to_string()),
        api_url: ctx.config.base_url(),
        authenticated: ctx.session.is_authenticated(),
        user: ctx
            .session
            .current_user_from_token()
            .as_ref()
            .map(ProfileDisplay::from),
        expires_at: ctx.session.token_expiry(),
        verified,
    };

    output::print(&display, ctx.format)
}
