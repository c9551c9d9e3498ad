//! Command-line interface for the atlas country statistics service.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod import;
mod serve;

pub use error::CliError;

/// Run the atlas CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Import(args) => import::run(args),
        Command::Serve(args) => serve::run(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "atlas",
    about = "Country listing import and region statistics service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch the remote country listing and upsert it into the store.
    Import(import::ImportArgs),
    /// Serve the region statistics endpoint over HTTP.
    Serve(serve::ServeArgs),
}

#[cfg(test)]
mod tests;
