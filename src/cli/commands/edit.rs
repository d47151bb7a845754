//! Song edit command.

use std::path::PathBuf;

use super::{absolute, find_track, open_cache, open_library};
use crate::config::Config;
use crate::editor::SongEditor;
use crate::error::ResultExt;

/// Rename a song and add/remove its custom images
pub fn cmd_edit(
    config: &Config,
    path: &PathBuf,
    song: Option<&str>,
    add_images: &[PathBuf],
    remove_images: &[PathBuf],
) -> anyhow::Result<()> {
    let library = open_library(config);
    let track = find_track(&library, path);
    let cache = open_cache(config);
    let mut cache = cache.lock();

    let mut editor = SongEditor::open(&cache, &track);
    if let Some(name) = song {
        editor.set_song_name(name);
    }

    let added = editor.add_images(add_images.iter().map(|p| absolute(p)));
    for image in remove_images {
        editor.select_image(&absolute(image));
        editor.remove_selected();
    }

    let missing = editor.images().iter().filter(|p| !p.is_file()).count();
    if missing > 0 {
        eprintln!("Warning: {} image(s) do not exist and will be skipped during playback", missing);
    }

    editor
        .save(&mut cache)
        .with_context("saving song cache")?;
    println!(
        "Saved \"{}\" with {} image(s) ({} added).",
        editor.song_name(),
        editor.images().len(),
        added
    );
    Ok(())
}
