//! StockNet CLI - client-side session for the StockNet platform

use clap::{CommandFactory, Parser};

mod cli;
mod client;
mod config;
mod error;
mod guard;
mod models;
mod navigation;
mod output;
mod session;

use cli::{Cli, Commands, ConfigCommands, GlobalOptions, ProfileCommands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Login { email, password } => cli::auth::login(&opts, email, password).await,
        Commands::Register {
            username,
            email,
            password,
        } => cli::auth::register(&opts, username, email, password).await,
        Commands::Logout => cli::auth::logout(&opts),
        Commands::Status { verify } => cli::status::run(&opts, verify).await,
        Commands::Profile(profile_cmd) => match profile_cmd {
            ProfileCommands::Show => cli::profile::show(&opts).await,
            ProfileCommands::Update { fields } => cli::profile::update(&opts, &fields).await,
        },
        Commands::Open { path } => cli::open::run(&opts, &path).await,
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Show => cli::config::show(&opts),
            ConfigCommands::SetUrl { url } => cli::config::set_url(&opts, &url),
        },
        Commands::Version => {
            println!("stocknet version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Completion { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "stocknet",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or this crate at debug with `--debug`
fn init_logging(debug: bool) {
    let default_filter = if debug { "warn,stocknet=debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
