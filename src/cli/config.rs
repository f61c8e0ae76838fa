//! Configuration commands

use colored::Colorize;
use serde::Serialize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::config::{Config, normalize_base_url};
use crate::error::Result;
use crate::output::json::format_json;
use crate::output::table::{Field, format_table};

#[derive(Debug, Serialize)]
struct ConfigView {
    config_file: String,
    api_url: String,
    storage: Option<String>,
    timeout_secs: u64,
}

/// Show the effective configuration
pub fn show(opts: &GlobalOptions) -> Result<()> {
    let config = CommandContext::load_config(opts)?;
    let view = ConfigView {
        config_file: Config::resolve_path(opts.config_ref())?
            .display()
            .to_string(),
        api_url: config.base_url(),
        storage: config.storage_file().map(|p| p.display().to_string()),
        timeout_secs: config.timeout_secs,
    };

    match opts.format {
        OutputFormat::Pretty => {
            let rows = vec![
                Field::new("Config file", view.config_file.as_str()),
                Field::new("API URL", view.api_url.as_str()),
                Field::new("Storage", view.storage.clone().unwrap_or_default()),
                Field::new("Timeout", format!("{}s", view.timeout_secs)),
            ];
            println!("{}", format_table(&rows));
        }
        OutputFormat::Json => println!("{}", format_json(&view)?),
    }

    Ok(())
}

/// Persist the API base URL
pub fn set_url(opts: &GlobalOptions, url: &str) -> Result<()> {
    let mut config = Config::load_at(opts.config_ref())?;
    config.api_url = normalize_base_url(url.trim());
    config.validate()?;
    config.save_at(opts.config_ref())?;

    let path = Config::resolve_path(opts.config_ref())?;
    println!(
        "{} API URL set to {} ({})",
        "✓".green(),
        config.api_url.cyan(),
        path.display()
    );

    Ok(())
}
