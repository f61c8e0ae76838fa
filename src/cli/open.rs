//! Open command: move to a view through the router

use colored::Colorize;
use serde::Serialize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat, spinner};
use crate::error::Result;
use crate::navigation::{Navigation, resolve};
use crate::output::json::format_json;

#[derive(Debug, Serialize)]
struct OpenResult<'a> {
    requested: &'a str,
    entered: bool,
    location: String,
}

/// Run the open command
pub async fn run(opts: &GlobalOptions, path: &str) -> Result<()> {
    let route = resolve(path)?;
    let ctx = CommandContext::new(opts)?;

    let progress = route.guarded.then(|| spinner("Checking session..."));
    let outcome = ctx.router().open(path).await;
    if let Some(progress) = progress {
        progress.finish_and_clear();
    }

    let result = match outcome? {
        Navigation::Entered(view) => {
            log::debug!("Entered {:?}", view);
            OpenResult {
                requested: route.path,
                entered: true,
                location: route.path.to_string(),
            }
        }
        Navigation::Redirected(location) => OpenResult {
            requested: route.path,
            entered: false,
            location,
        },
    };

    match ctx.format {
        OutputFormat::Pretty if result.entered => {
            println!("{} Opened {}", "✓".green(), result.location.cyan());
        }
        OutputFormat::Pretty => {
            println!(
                "{} {} requires a valid session; redirected to {}",
                "✗".red(),
                result.requested,
                result.location.cyan()
            );
        }
        OutputFormat::Json => println!("{}", format_json(&result)?),
    }

    Ok(())
}
