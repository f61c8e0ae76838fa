//! CLI command definitions and handlers

use std::borrow::Cow;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;
use indicatif::{ProgressBar, ProgressStyle};

pub mod args;
pub mod auth;
pub mod config;
pub mod context;
pub mod open;
pub mod profile;
pub mod status;

pub use args::{GlobalOptions, OutputFormat, ProfileUpdateArgs};
pub use context::CommandContext;

/// StockNet CLI - sign in to StockNet and manage your session
#[derive(Parser, Debug)]
#[command(name = "stocknet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, json)
    #[arg(
        long,
        global = true,
        env = "STOCKNET_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "STOCKNET_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override the API base URL
    #[arg(long, global = true, env = "STOCKNET_API_URL", hide_env = true)]
    pub api_url: Option<String>,

    /// Override the token storage file
    #[arg(long, global = true, env = "STOCKNET_STORAGE", hide_env = true)]
    pub storage: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true, env = "STOCKNET_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in with email and password
    Login {
        /// Account email (prompted when omitted)
        #[arg(long, short = 'e')]
        email: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long, short = 'p', env = "STOCKNET_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create an account
    Register {
        /// Username (prompted when omitted)
        #[arg(long, short = 'u')]
        username: Option<String>,

        /// Account email (prompted when omitted)
        #[arg(long, short = 'e')]
        email: Option<String>,

        /// Password (prompted with confirmation when omitted)
        #[arg(long, short = 'p', env = "STOCKNET_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the local session
    Status {
        /// Also ask the server whether the session is still valid
        #[arg(long)]
        verify: bool,
    },

    /// View and edit your profile
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Open a view (/, /login, /register, /profile)
    #[command(after_help = "EXAMPLES:\n  \
            stocknet open /profile\n  \
            stocknet open login")]
    Open {
        /// Route path
        path: String,
    },

    /// Manage CLI configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Display version information
    Version,

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   stocknet completion bash > /etc/bash_completion.d/stocknet
  zsh:    stocknet completion zsh > \"${fpath[1]}/_stocknet\"
  fish:   stocknet completion fish > ~/.config/fish/completions/stocknet.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Profile subcommands
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Show your profile as stored on the server
    Show,

    /// Change profile fields
    #[command(after_help = "EXAMPLES:\n  \
            stocknet profile update --full-name \"Ana Torres\"\n  \
            stocknet profile update --phone 555-0100 --birth-date 1994-03-08")]
    Update {
        #[command(flatten)]
        fields: ProfileUpdateArgs,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Set the API base URL
    SetUrl {
        /// Base URL, e.g. https://stocknet.example.com/api/
        url: String,
    },
}

/// Spinner on stderr while a request is in flight
pub fn spinner(message: impl Into<Cow<'static, str>>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
