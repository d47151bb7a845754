//! CLI command definitions and dispatch.
//!
//! Each group of subcommands lives in its own submodule:
//! - `library`: add, remove, list and folder scan
//! - `playback`: resolve and play (with slideshow)
//! - `edit`: song name and custom images

mod edit;
mod library;
mod playback;

use clap::{Parser, Subcommand};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Runtime;

use crate::cache::SongCache;
use crate::config::{self, Config};
use crate::error::Error;
use crate::library::Library;
use crate::model::Track;

pub use edit::cmd_edit;
pub use library::{cmd_add, cmd_list, cmd_remove, cmd_scan};
pub use playback::{cmd_play, cmd_resolve};

/// Tunedeck CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of the OS default location
    #[arg(long, global = true, env = "TUNEDECK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Add audio files to the library
    Add {
        /// Files to add
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Remove a track from the library
    Remove {
        /// Path of the track to remove
        path: PathBuf,
    },
    /// List all tracks in the library
    List,
    /// Scan a folder and add every audio file found
    Scan {
        /// Folder to scan recursively
        path: PathBuf,
    },
    /// Show what would be displayed for a track
    Resolve {
        /// Path of the track
        path: PathBuf,
    },
    /// Play a track: resolve its metadata and run the image slideshow
    Play {
        /// Path of the track
        path: PathBuf,
        /// Number of slideshow ticks to run before exiting
        #[arg(long, default_value = "5")]
        ticks: u32,
    },
    /// Edit a song's cached name and custom images
    Edit {
        /// Path of the track
        path: PathBuf,
        /// New song name
        #[arg(long)]
        song: Option<String>,
        /// Images to append to the slideshow
        #[arg(long = "add-image")]
        add_images: Vec<PathBuf>,
        /// Images to remove from the slideshow
        #[arg(long = "remove-image")]
        remove_images: Vec<PathBuf>,
    },
    /// Print the config file location and effective settings
    Config {
        /// Write the effective settings to the config file
        #[arg(long)]
        init: bool,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => config::load_from(path),
        None => config::load(),
    };

    match &cli.command {
        Commands::Add { paths } => cmd_add(&config, paths),
        Commands::Remove { path } => cmd_remove(&config, path),
        Commands::List => cmd_list(&config),
        Commands::Scan { path } => {
            let rt = Runtime::new()?;
            cmd_scan(&rt, &config, path)
        }
        Commands::Resolve { path } => {
            let rt = Runtime::new()?;
            cmd_resolve(&rt, &config, path)
        }
        Commands::Play { path, ticks } => {
            let rt = Runtime::new()?;
            cmd_play(&rt, &config, path, *ticks)
        }
        Commands::Edit {
            path,
            song,
            add_images,
            remove_images,
        } => cmd_edit(&config, path, song.as_deref(), add_images, remove_images),
        Commands::Config { init } => cmd_config(cli.config.as_deref(), &config, *init),
    }
}

/// Print where config lives and what is in effect, optionally writing it
fn cmd_config(explicit: Option<&Path>, config: &Config, init: bool) -> anyhow::Result<()> {
    if init {
        let path = match explicit {
            Some(path) => {
                config::save_to(config, path).map_err(Error::from)?;
                path.to_path_buf()
            }
            None => config::save(config).map_err(Error::from)?,
        };
        println!("Wrote {}", path.display());
        return Ok(());
    }

    match explicit.map(Path::to_path_buf).or_else(config::config_path) {
        Some(path) => println!("# {}", path.display()),
        None => println!("# (no config directory)"),
    }
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

// ============================================================================
// Shared helper functions
// ============================================================================

pub(crate) fn open_library(config: &Config) -> Library {
    Library::load(config.storage.library_path())
}

pub(crate) fn open_cache(config: &Config) -> Arc<Mutex<SongCache>> {
    Arc::new(Mutex::new(SongCache::load(config.storage.cache_path())))
}

/// Absolute form of a user-supplied path; the library keys on these.
pub(crate) fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// The library entry for `path`, or an ad-hoc track when it isn't there.
pub(crate) fn find_track(library: &Library, path: &Path) -> Track {
    let path = absolute(path);
    library
        .get(&path)
        .cloned()
        .unwrap_or_else(|| Track::from_path(path))
}
