//! Bookrev CLI - Command line client for the book review service
//!
//! Users log in, submit and manage their own reviews, and moderators
//! approve or reject pending submissions.

mod commands;

use bookrev_core::{Config, Session};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{AuthArgs, FeedArgs, ModerateArgs, RegisterArgs, ReviewArgs};

/// Bookrev: client for the book review service
#[derive(Parser, Debug)]
#[command(name = "bookrev")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Base URL of the review service (overrides config and env)
    #[arg(long, global = true, env = "BOOKREV_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Log in and store the session token
    Login(AuthArgs),

    /// Register a new account
    Register(RegisterArgs),

    /// Log out and clear the stored session
    Logout {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the public feed of approved reviews
    Feed(FeedArgs),

    /// Manage your own reviews
    #[command(visible_alias = "r")]
    Review(ReviewArgs),

    /// Moderate pending reviews (admin)
    #[command(visible_alias = "mod")]
    Moderate(ModerateArgs),

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    // Load configuration with overrides
    let config = Config::load_with_overrides(cli.api_url.clone())?;

    if cli.verbose {
        tracing::info!(base_url = %config.api.base_url, "Configuration loaded");
    }

    // Resolve the stored session once and inject it into the commands
    let session = Session::load()?;

    match cli.command {
        Some(Commands::Version) => {
            println!("bookrev {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Login(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Register(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Logout { yes }) => {
            commands::logout(yes)?;
        }
        Some(Commands::Feed(args)) => {
            args.execute(&config, session.as_ref()).await?;
        }
        Some(Commands::Review(args)) => {
            args.execute(cli.verbose, &config, session.as_ref()).await?;
        }
        Some(Commands::Moderate(args)) => {
            args.execute(cli.verbose, &config, session.as_ref()).await?;
        }
        Some(Commands::Config) => {
            println!("Bookrev Configuration");
            println!("=====================");
            println!();
            println!("Service:");
            println!("  base_url: {}", config.api.base_url);
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
            match &session {
                Some(session) => {
                    let role = session
                        .role()
                        .map(|r| r.as_str().to_string())
                        .unwrap_or_else(|| "(unreadable token)".to_string());
                    println!("Session: logged in, role hint: {}", role);
                }
                None => println!("Session: not logged in"),
            }
        }
        None => {
            println!("Bookrev - client for the book review service");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
