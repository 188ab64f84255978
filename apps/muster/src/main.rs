//! # Muster - Cadet Assignment Engine
//!
//! The main binary for Muster.
//!
//! This application provides:
//! - CLI interface for roster enrollment and assignment runs
//! - HTTP REST API server (axum-based)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                apps/muster (THE BINARY)             │
//! │                                                     │
//! │  ┌─────────────┐    ┌─────────────┐    ┌────────┐   │
//! │  │   CLI       │    │   HTTP API  │    │ Config │   │
//! │  │  (clap)     │    │   (axum)    │    │ (toml) │   │
//! │  └──────┬──────┘    └──────┬──────┘    └───┬────┘   │
//! │         └──────────────────┼───────────────┘        │
//! │                            ▼                        │
//! │                    ┌───────────────┐                │
//! │                    │  muster-core  │                │
//! │                    │ (THE ENGINE)  │                │
//! │                    └───────────────┘                │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! muster init
//! muster enroll -f cadets.json
//! muster assign --simulate
//! muster assign
//! muster server --host 0.0.0.0 --port 8080
//! ```

use clap::Parser;
use muster::{cli, logging};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    logging::init_tracing();

    let cli = cli::Cli::parse();

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
