mod commands;
mod config;

use clap::{Parser, Subcommand};
use stakeboard_game::GameError;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "stakeboard")]
#[command(about = "Stake, borrow and open on-chain tic-tac-toe games")]
#[command(version)]
struct Cli {
    /// Client config file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cost breakdown of a stake
    Quote {
        /// Stake in STX
        stake: String,
        /// Borrow the stake from the lending pool
        #[arg(short, long)]
        lending: bool,
        #[command(flatten)]
        funds: commands::FundsArgs,
    },
    /// Show the largest stake the balance can back
    Max {
        /// Borrow the stake from the lending pool
        #[arg(short, long)]
        lending: bool,
        #[command(flatten)]
        funds: commands::FundsArgs,
    },
    /// Create a game with an opening move
    Create {
        /// Stake in STX
        stake: String,
        /// Opening cell (0-8, row-major from the top-left)
        #[arg(long)]
        cell: Option<usize>,
        /// Borrow the stake from the lending pool
        #[arg(short, long)]
        lending: bool,
        #[command(flatten)]
        funds: commands::FundsArgs,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "stakeboard={},stakeboard_core={},stakeboard_game={}",
            log_level, log_level, log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let result = match config::load_client_config(cli.config.as_deref()) {
        Ok(client_config) => match cli.command {
            Commands::Quote {
                stake,
                lending,
                funds,
            } => commands::show_quote(&client_config, &stake, lending, &funds).await,
            Commands::Max { lending, funds } => {
                commands::show_max_stake(&client_config, lending, &funds).await
            }
            Commands::Create {
                stake,
                cell,
                lending,
                funds,
                yes,
            } => {
                commands::create_game(&client_config, &stake, cell, lending, &funds, yes).await
            }
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        match e.downcast_ref::<GameError>() {
            Some(GameError::NoMoveSelected) => {
                eprintln!("Error: {}", e);
                eprintln!("Pick your opening cell with --cell <0-8>");
            }
            Some(GameError::ZeroStake) => {
                eprintln!("Error: {}", e);
                eprintln!("Enter a stake above 0 STX");
            }
            Some(GameError::InsufficientBalance {
                shortfall,
                need,
                available,
            }) => {
                eprintln!("Error: Insufficient balance!");
                eprintln!("Need {} {}, available {}", need, shortfall, available);
                eprintln!("Use 'stakeboard max' to see the largest stake you can place");
            }
            _ => {
                eprintln!("Error: {:#}", e);
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
