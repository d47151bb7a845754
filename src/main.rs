//! Tunedeck - a local music player core with remote metadata enrichment.
//!
//! Keeps a library of local audio files, resolves display metadata for the
//! playing track (song cache first, then the iTunes Search API), and cycles
//! user-supplied images while a track plays. The CLI in [`cli`] drives the
//! same calls a desktop front end would.

pub mod cache;
pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod library;
pub mod model;
pub mod persist;
pub mod provider;
pub mod resolver;
pub mod scanner;
pub mod session;
pub mod slideshow;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("tunedeck=info"))?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run_command(&args)
}
