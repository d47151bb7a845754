//! Playback session: the glue a front end drives on user actions.
//!
//! Mirrors the message/task split of a retained-mode UI: [`PlayerSession::play`]
//! hands back a `'static` future to run off the UI thread, and the caller
//! feeds its output to [`PlayerSession::show`] when it completes.

use std::future::Future;
use std::sync::Arc;

use crate::model::Track;
use crate::provider::MetadataProvider;
use crate::resolver::{MetadataResolver, ResolvedView};
use crate::slideshow::{Artwork, SlideshowController};

/// Current playback status. Only changed by direct user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Everything the now-playing panel needs after a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayUpdate {
    pub view: ResolvedView,
    pub artwork: Artwork,
}

/// Single-owner playback and display state.
pub struct PlayerSession<P> {
    resolver: Arc<MetadataResolver<P>>,
    slideshow: SlideshowController,
    status: PlaybackStatus,
    current: Option<Track>,
}

impl<P> PlayerSession<P>
where
    P: MetadataProvider + 'static,
{
    pub fn new(resolver: Arc<MetadataResolver<P>>, slideshow: SlideshowController) -> Self {
        Self {
            resolver,
            slideshow,
            status: PlaybackStatus::Stopped,
            current: None,
        }
    }

    /// Single selection: show the file name and path, no lookup.
    pub fn select(&self, track: &Track) -> DisplayUpdate {
        DisplayUpdate {
            view: self.resolver.preview(track),
            artwork: Artwork::Default,
        }
    }

    /// Start playing `track` and return its resolution task.
    ///
    /// Stops the slideshow first. The lookup slot is claimed here, not when
    /// the task is first polled, so this call supersedes every earlier
    /// `play` whatever order their tasks run in.
    pub fn play(
        &mut self,
        track: Track,
    ) -> impl Future<Output = Option<ResolvedView>> + Send + use<P> {
        self.slideshow.stop();
        self.status = PlaybackStatus::Playing;
        self.current = Some(track.clone());
        tracing::info!(path = %track.file_path.display(), "Playing");

        let resolver = self.resolver.clone();
        let lookup = resolver.begin_lookup();
        async move { resolver.resolve_with(&track, lookup).await }
    }

    /// Apply a finished resolution.
    ///
    /// Views for anything but the current track are dropped.
    pub fn show(&mut self, view: Option<ResolvedView>) -> Option<DisplayUpdate> {
        let view = view?;
        let current = self.current.as_ref()?;
        if current.file_path != view.file_path || self.status == PlaybackStatus::Stopped {
            tracing::debug!(path = %view.file_path.display(), "Dropping stale view");
            return None;
        }

        let artwork = self.slideshow.start_for_view(&view);
        Some(DisplayUpdate { view, artwork })
    }

    pub fn pause(&mut self) {
        if self.status == PlaybackStatus::Playing {
            self.status = PlaybackStatus::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.status == PlaybackStatus::Paused {
            self.status = PlaybackStatus::Playing;
        }
    }

    /// Stop playback, the slideshow and any pending lookup.
    pub fn stop(&mut self) {
        self.slideshow.stop();
        self.resolver.cancel_current();
        self.status = PlaybackStatus::Stopped;
    }

    /// Forward a timer tick to the slideshow.
    pub fn tick(&mut self) -> Option<Artwork> {
        self.slideshow.tick()
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn current(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub fn slideshow(&self) -> &SlideshowController {
        &self.slideshow
    }

    pub fn resolver(&self) -> &Arc<MetadataResolver<P>> {
        &self.resolver
    }
}
