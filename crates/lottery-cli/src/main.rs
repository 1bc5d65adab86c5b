mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::participants::ParticipantsSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "lottery",
    about = "Lunch lottery: collect signups on alternating sheets and pair people up for lunch",
    version,
    propagate_version = true
)]
struct Cli {
    /// Lottery root (default: auto-detect from .lottery/)
    #[arg(long, global = true, env = "LOTTERY_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .lottery/ with a default config and an empty ledger
    Init,

    /// Show the active signup sheet and the last lottery run
    Status,

    /// List or add signups on the active sheet
    Participants {
        #[command(subcommand)]
        subcommand: ParticipantsSubcommand,
    },

    /// Show the most recent pairings
    Pairings,

    /// Pair everyone on the active sheet, notify them, and switch sheets
    Run,

    /// Empty both sheets, drop pairings, and reset to sheet A
    Clear,

    /// Start the HTTP API
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "3000")]
        port: u16,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Status => cmd::status::run(&root, cli.json),
        Commands::Participants { subcommand } => {
            cmd::participants::run(&root, subcommand, cli.json)
        }
        Commands::Pairings => cmd::pairings::run(&root, cli.json),
        Commands::Run => cmd::run::run(&root, cli.json),
        Commands::Clear => cmd::clear::run(&root, cli.json),
        Commands::Serve { port } => cmd::serve::run(&root, port),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
