//! # Muster CLI Module
//!
//! This module implements the CLI interface for Muster.
//!
//! ## Available Commands
//!
//! - `init` - Initialize a new roster database
//! - `enroll` - Import cadet records from a JSON file
//! - `roster` - List the eligible roster in assignment order
//! - `assign` - Run the assignment engine (or simulate it)
//! - `status` - Show assignment counts per battalion, company and platoon
//! - `compact` - Reclaim free space in the database file
//! - `server` - Start the HTTP server

mod commands;

use crate::config::MusterConfig;
use clap::{Parser, Subcommand};
use muster_core::{ErrorPolicy, MusterError};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Muster - cadet organizational assignment
///
/// Places every approved cadet in a battalion and derives platoon and
/// company labels from their position in the roster.
#[derive(Parser, Debug)]
#[command(name = "muster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the roster database (overrides config and MUSTER_DATABASE)
    #[arg(short = 'D', long, global = true)]
    pub database: Option<PathBuf>,

    /// Path to a TOML config file (default: ./muster.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new empty roster database
    Init {
        /// Replace an existing database
        #[arg(short, long)]
        force: bool,
    },

    /// Import cadet records from a JSON array
    Enroll {
        /// Path to the input file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// List the eligible roster in assignment order
    Roster {
        /// List every stored record, eligible or not
        #[arg(short, long)]
        all: bool,
    },

    /// Assign battalion, company and platoon to every eligible cadet
    Assign {
        /// Compute and report without writing anything
        #[arg(short, long)]
        simulate: bool,

        /// Stop writing after the first failed write
        #[arg(long)]
        abort_on_error: bool,
    },

    /// Show assignment counts
    Status,

    /// Reclaim free space in the roster database file
    Compact,

    /// Start HTTP server
    Server {
        /// Host to bind to (default from config)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (default from config)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), MusterError> {
    let config = MusterConfig::load(cli.config.as_deref())?;
    let db_path = cli.database.unwrap_or_else(|| config.database.clone());
    let json_mode = cli.json_mode;

    if cli.verbose {
        tracing::info!("Using database {:?}", db_path);
    }

    match cli.command {
        Some(Commands::Init { force }) => cmd_init(&db_path, force),
        Some(Commands::Enroll { file }) => cmd_enroll(&db_path, json_mode, &file),
        Some(Commands::Roster { all }) => cmd_roster(&db_path, json_mode, all),
        Some(Commands::Assign {
            simulate,
            abort_on_error,
        }) => {
            let policy = if abort_on_error {
                ErrorPolicy::Abort
            } else {
                config.assignment.on_error
            };
            cmd_assign(&db_path, json_mode, cli.verbose, simulate, policy)
        }
        Some(Commands::Status) => cmd_status(&db_path, json_mode),
        Some(Commands::Compact) => cmd_compact(&db_path, json_mode),
        Some(Commands::Server { host, port }) => {
            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            cmd_server(&db_path, &host, port, config.assignment.on_error).await
        }
        None => {
            // No subcommand - show status by default
            cmd_status(&db_path, json_mode)
        }
    }
}
