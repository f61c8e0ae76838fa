//! Login, register and logout commands

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};
use serde_json::json;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat, spinner};
use crate::client::models::{LoginRequest, RegisterRequest};
use crate::error::{ApiError, Error, Result};
use crate::models::ProfileDisplay;
use crate::navigation::Navigator;
use crate::output::json::format_json;

/// Run the login command
pub async fn login(
    opts: &GlobalOptions,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let email = match email {
        Some(email) => email,
        None => prompt_text("Email")?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .interact()?,
    };

    // Skip the replayed value; only what login publishes matters
    let mut changes = ctx.session.state().subscribe();
    changes.latest();

    let progress = spinner("Signing in...");
    let result = ctx.session.login(&LoginRequest::new(email, password)).await;
    progress.finish_and_clear();
    let response = credential_failure(result)?;

    if !response.success {
        return Err(Error::Rejected(response.message_or("Login failed").to_string()));
    }

    let issued = response
        .data
        .as_ref()
        .and_then(|d| d.token.as_deref())
        .is_some_and(|t| !t.is_empty());
    if !issued {
        return Err(Error::Rejected(
            "Login succeeded but the server did not return a session token".to_string(),
        ));
    }

    let user = changes.latest().flatten();

    match ctx.format {
        OutputFormat::Pretty => {
            match &user {
                Some(user) => println!(
                    "{} Signed in as {} <{}>",
                    "✓".green(),
                    user.display_name().bold(),
                    user.email
                ),
                None => {
                    println!("{} Signed in", "✓".green());
                    println!(
                        "{} Token stored but it carries no readable identity",
                        "⚠".yellow()
                    );
                }
            }
            if let Some(message) = response.message.filter(|m| !m.is_empty()) {
                println!("  {}", message.dimmed());
            }
        }
        OutputFormat::Json => println!(
            "{}",
            format_json(&json!({
                "authenticated": true,
                "user": user.as_ref().map(ProfileDisplay::from),
                "location": ctx.history.current(),
            }))?
        ),
    }

    Ok(())
}

/// Run the register command
pub async fn register(
    opts: &GlobalOptions,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let username = match username {
        Some(username) => username,
        None => prompt_text("Username")?,
    };
    let email = match email {
        Some(email) => email,
        None => prompt_text("Email")?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?,
    };

    let progress = spinner("Creating account...");
    let result = ctx
        .session
        .register(&RegisterRequest::new(username, email, password))
        .await;
    progress.finish_and_clear();
    let response = credential_failure(result)?;

    if !response.success {
        return Err(Error::Rejected(response.message_or("Registration failed").to_string()));
    }

    let signed_in = ctx.session.is_authenticated();

    match ctx.format {
        OutputFormat::Pretty => {
            println!("{} Account created", "✓".green());
            if !signed_in {
                println!("  → Run '{}' to sign in", "stocknet login".cyan());
            }
        }
        OutputFormat::Json => println!(
            "{}",
            format_json(&json!({
                "registered": true,
                "authenticated": signed_in,
                "message": response.message,
                "location": ctx.history.current(),
            }))?
        ),
    }

    Ok(())
}

/// Run the logout command
pub fn logout(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let was_signed_in = ctx.session.is_authenticated();

    ctx.session.logout();

    match ctx.format {
        OutputFormat::Pretty => {
            if was_signed_in {
                println!("{} Signed out", "✓".green());
            } else {
                println!("{} No active session", "○".dimmed());
            }
        }
        OutputFormat::Json => println!(
            "{}",
            format_json(&json!({
                "authenticated": false,
                "location": ctx.history.current(),
            }))?
        ),
    }

    Ok(())
}

/// A 401 on the auth endpoints means bad credentials; report the server's own message
fn credential_failure<T>(result: Result<T>) -> Result<T> {
    match result {
        Err(Error::Api(ApiError::Unauthorized(Some(message)))) => Err(Error::Rejected(message)),
        other => other,
    }
}

fn prompt_text(prompt: &str) -> Result<String> {
    Ok(Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()?)
}
