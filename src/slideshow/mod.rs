//! Custom image slideshow shown while a track plays.
//!
//! `Stopped -> Running -> Stopped`. The controller only tracks state; the
//! caller owns the timer and calls [`SlideshowController::tick`] every
//! [`SlideshowController::interval`].

use std::path::PathBuf;
use std::time::Duration;

use crate::resolver::{ArtworkSource, ResolvedView};

/// What the artwork panel should show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Artwork {
    #[default]
    Default,
    Remote(String),
    Local(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlideshowState {
    #[default]
    Stopped,
    Running,
}

/// Cycles through user images, falling back to remote/default artwork.
#[derive(Debug)]
pub struct SlideshowController {
    interval: Duration,
    images: Vec<PathBuf>,
    index: usize,
    fallback: Artwork,
    state: SlideshowState,
}

impl SlideshowController {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            images: Vec::new(),
            index: 0,
            fallback: Artwork::Default,
            state: SlideshowState::Stopped,
        }
    }

    /// Start showing `images`, returning what to display right now.
    ///
    /// Only images that exist are used. With none, `fallback` is shown and
    /// the controller stays stopped; with one it is shown without
    /// advancing; with two or more the controller starts running.
    pub fn start(&mut self, images: &[PathBuf], fallback: Artwork) -> Artwork {
        self.stop();

        self.images = images.iter().filter(|p| p.is_file()).cloned().collect();
        self.fallback = fallback;

        let Some(first) = self.images.first().cloned() else {
            return self.fallback.clone();
        };

        if self.images.len() >= 2 {
            self.state = SlideshowState::Running;
            tracing::debug!(images = self.images.len(), "Slideshow running");
        }
        Artwork::Local(first)
    }

    /// Start from a resolved view's artwork source.
    pub fn start_for_view(&mut self, view: &ResolvedView) -> Artwork {
        match &view.artwork {
            ArtworkSource::CustomImages { images, remote_url } => {
                let fallback = remote_url
                    .clone()
                    .map(Artwork::Remote)
                    .unwrap_or_default();
                self.start(images, fallback)
            }
            ArtworkSource::RemoteUrl(url) => self.start(&[], Artwork::Remote(url.clone())),
            ArtworkSource::Default => self.start(&[], Artwork::Default),
        }
    }

    /// Advance to the next image. `None` while stopped.
    ///
    /// A vanished image shows the fallback for this tick only.
    pub fn tick(&mut self) -> Option<Artwork> {
        if self.state != SlideshowState::Running || self.images.is_empty() {
            return None;
        }

        self.index = (self.index + 1) % self.images.len();
        let path = &self.images[self.index];

        if path.is_file() {
            Some(Artwork::Local(path.clone()))
        } else {
            tracing::warn!(path = %path.display(), "Slideshow image missing, showing fallback");
            Some(self.fallback.clone())
        }
    }

    /// Halt and forget the current images. Safe to call in any state.
    pub fn stop(&mut self) {
        if self.state == SlideshowState::Running {
            tracing::debug!("Slideshow stopped");
        }
        self.state = SlideshowState::Stopped;
        self.images.clear();
        self.index = 0;
        self.fallback = Artwork::Default;
    }

    pub fn state(&self) -> SlideshowState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SlideshowState::Running
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn current_index(&self) -> usize {
        self.index
    }
}
