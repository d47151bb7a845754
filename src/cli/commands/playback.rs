//! Resolve and play commands.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

use super::{find_track, open_cache, open_library};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::provider::ItunesClient;
use crate::resolver::{ArtworkSource, MetadataResolver, ResolvedView};
use crate::session::{DisplayUpdate, PlayerSession};
use crate::slideshow::{Artwork, SlideshowController};

fn build_resolver(config: &Config) -> Result<MetadataResolver<ItunesClient>> {
    let client = ItunesClient::new(&config.provider)
        .map_err(|e| Error::from(e).context("building search client"))?;
    Ok(MetadataResolver::new(client, open_cache(config)))
}

/// Resolve and print display metadata for a track
pub fn cmd_resolve(rt: &Runtime, config: &Config, path: &PathBuf) -> anyhow::Result<()> {
    let library = open_library(config);
    let track = find_track(&library, path);
    let resolver = build_resolver(config)?;

    match rt.block_on(resolver.resolve(&track)) {
        Some(view) => print_view(&view),
        None => println!("Lookup was superseded"),
    }
    Ok(())
}

/// Play a track: resolve, then run the slideshow for `ticks` intervals
pub fn cmd_play(rt: &Runtime, config: &Config, path: &PathBuf, ticks: u32) -> anyhow::Result<()> {
    let library = open_library(config);
    let track = find_track(&library, path);
    let resolver = Arc::new(build_resolver(config)?);
    let mut session = PlayerSession::new(
        resolver.clone(),
        SlideshowController::new(config.slideshow.interval()),
    );

    rt.block_on(async {
        let preview = session.select(&track);
        print_view(&preview.view);

        let task = session.play(track);
        let Some(update) = session.show(task.await) else {
            println!("Lookup was superseded");
            return;
        };
        print_update(&resolver, &update).await;

        if !session.slideshow().is_running() {
            return;
        }

        let mut interval = tokio::time::interval(session.slideshow().interval());
        interval.tick().await; // first tick fires immediately
        for _ in 0..ticks {
            tokio::select! {
                _ = interval.tick() => {
                    if let Some(artwork) = session.tick() {
                        println!("Artwork: {}", describe(&artwork));
                    }
                }
                _ = tokio::signal::ctrl_c() => break,
            }
        }
        session.stop();
    });

    Ok(())
}

async fn print_update(resolver: &MetadataResolver<ItunesClient>, update: &DisplayUpdate) {
    print_view(&update.view);
    println!("Artwork: {}", describe(&update.artwork));

    if let Artwork::Remote(url) = &update.artwork {
        match resolver.fetch_artwork(url).await {
            Some(data) => println!("Downloaded artwork ({} bytes)", data.len()),
            None => println!("Artwork unavailable, showing default cover"),
        }
    }
}

fn print_view(view: &ResolvedView) {
    let labels = view.labels();
    println!("{}", labels.song);
    println!("{}", labels.artist);
    println!("{}", labels.album);
    println!("{}", labels.path);
    let source = match &view.artwork {
        ArtworkSource::Default => "default cover".to_string(),
        ArtworkSource::CustomImages { images, .. } => format!("{} custom image(s)", images.len()),
        ArtworkSource::RemoteUrl(url) => url.clone(),
    };
    println!("Cover: {} ({:?})", source, view.origin);
}

fn describe(artwork: &Artwork) -> String {
    match artwork {
        Artwork::Default => "default cover".to_string(),
        Artwork::Remote(url) => url.clone(),
        Artwork::Local(path) => path.display().to_string(),
    }
}
