//! CLI command definitions for the `whatsai` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod analyze;
pub mod config;
pub mod personalities;

use clap::{Parser, Subcommand};

/// WhatsApp auto-reply assistant that answers in your voice.
#[derive(Parser)]
#[command(name = "whatsai", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans to OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Emit log lines as JSON.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the auto-reply runtime and the dashboard API.
    Serve {
        /// Address to bind (overrides `server.host`).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides `server.port` and `PORT`).
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// List the preset personalities.
    Personalities,

    /// Analyze a writing sample and print the resulting style profile.
    Analyze {
        /// File containing the sample, or `-` for stdin.
        input: String,
    },

    /// Print the effective configuration.
    Config,
}
