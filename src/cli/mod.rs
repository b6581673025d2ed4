//! CLI module for the Places API
//!
//! - `serve`: run the HTTP server
//! - `sign`: compute signature headers for the key bootstrap route

pub mod serve;
pub mod sign;

use clap::{Parser, Subcommand};

/// Places API - geographic points behind signed key issuance and API keys
#[derive(Parser)]
#[command(name = "places-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Print x-timestamp and x-signature headers for a request
    Sign(sign::SignArgs),
}
