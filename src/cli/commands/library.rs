//! Library management commands.

use std::path::PathBuf;
use tokio::runtime::Runtime;
use tracing::info;

use super::{absolute, open_library};
use crate::config::Config;
use crate::error::{Error, ResultExt};
use crate::scanner;

/// Add files to the library
pub fn cmd_add(config: &Config, paths: &[PathBuf]) -> anyhow::Result<()> {
    let mut library = open_library(config);
    let added = library
        .add_files(paths.iter().map(|p| absolute(p)))
        .with_context("saving library")?;
    println!("Added {} track(s), library now has {}.", added, library.len());
    Ok(())
}

/// Remove a track from the library
pub fn cmd_remove(config: &Config, path: &PathBuf) -> anyhow::Result<()> {
    let mut library = open_library(config);
    if library
        .remove(&absolute(path))
        .with_context("saving library")?
    {
        println!("Removed {}", path.display());
        Ok(())
    } else {
        Err(Error::not_found(path).into())
    }
}

/// List all tracks in the library
pub fn cmd_list(config: &Config) -> anyhow::Result<()> {
    let library = open_library(config);
    for track in library.tracks() {
        println!("{} - {}", track.title, track.file_path.display());
    }
    Ok(())
}

/// Scan a folder and merge new tracks into the library
pub fn cmd_scan(rt: &Runtime, config: &Config, path: &PathBuf) -> anyhow::Result<()> {
    let root = absolute(path);
    println!("Scanning directory: {}", root.display());

    let found = rt.block_on(scanner::scan_tracks(root));
    info!(target: "scanner", count = found.len(), "Scan finished");

    let total = found.len();
    let mut library = open_library(config);
    let added = library
        .merge_scanned(found)
        .with_context("saving library")?;
    println!("Scan complete. Found {} track(s), {} new.", total, added);
    Ok(())
}
