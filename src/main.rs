//! Guestbook CLI
//!
//! Runs the guestbook server and works with the server's entry file directly:
//! - Serve the guestbook page
//! - List entries
//! - Sign the guestbook
//! - Print a default config file

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use guestbook::api::{serve, AppState};
use guestbook::config::{generate_default_config, Config, LoggingConfig};
use guestbook::{Submission, SubmitOutcome};

#[derive(Parser)]
#[command(name = "guestbook")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A guestbook with browser-local and server-side entries")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Override the listen port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List stored entries, newest first
    List {
        /// Print raw JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Add an entry
    Sign {
        /// Author name (default: Anonymous)
        #[arg(short, long, default_value = "")]
        author: String,
        /// Message
        content: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    init_logging(&config.logging);

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }

            tracing::info!("Starting Guestbook server v{}", env!("CARGO_PKG_VERSION"));
            tracing::info!("Data directory: {:?}", config.storage.data_dir);
            tracing::info!("Static directory: {:?}", config.server.static_dir);

            let state = AppState::from_config(&config)?;
            serve(state).await?;

            tracing::info!("Guestbook server stopped");
        }

        Commands::List { json } => {
            let state = AppState::from_config(&config)?;
            let entries = state.guestbook.entries()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                println!("{}", guestbook::EMPTY_NOTICE);
            } else {
                for block in guestbook::render_entries(&entries).blocks() {
                    println!("{}", block.header());
                    println!("{}", block.body);
                    println!("  -- {}", block.timestamp);
                    println!();
                }
            }
        }

        Commands::Sign { author, content } => {
            let state = AppState::from_config(&config)?;

            match state.submit(&Submission::new(author, content)).await? {
                SubmitOutcome::Saved { entry } => {
                    println!(
                        "Signed as {} at {}",
                        entry.display_author(),
                        entry.date
                    );
                }
                SubmitOutcome::Rejected { alert } => {
                    eprintln!("{}", alert);
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Wrote default config to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Initialize tracing from the logging config, `RUST_LOG` taking precedence
fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("guestbook={},tower_http=debug", logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
