//! A DetailView that records every call
//!
//! Backs the scriptable CLI (events are printed as JSON) and the presenter
//! tests.

use std::cell::Cell;

use serde::Serialize;

use crate::models::{DeviceProfile, LayoutHints, MediaRecord, TransitionHint};
use crate::presenter::DetailView;

/// One call made on the view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ViewEvent {
    ApplyLayoutHints {
        hints: LayoutHints,
    },
    LoadBackgroundImage {
        url: String,
    },
    RenderMovie {
        id: String,
        title: String,
    },
    RenderShow {
        id: String,
        title: String,
    },
    ShowDialog {
        title_key: String,
        message_key: String,
    },
    NavigateStagedLoading {
        id: String,
        transition: Option<TransitionHint>,
    },
    NavigateDirectPlayer {
        id: String,
    },
    NavigateTrailer {
        id: String,
        url: String,
    },
    ShowHealthBanner {
        classification_key: String,
        seeds: u32,
        peers: u32,
    },
}

impl ViewEvent {
    pub fn is_render(&self) -> bool {
        matches!(self, ViewEvent::RenderMovie { .. } | ViewEvent::RenderShow { .. })
    }

    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            ViewEvent::NavigateStagedLoading { .. }
                | ViewEvent::NavigateDirectPlayer { .. }
                | ViewEvent::NavigateTrailer { .. }
        )
    }
}

/// View that keeps an ordered log of calls
#[derive(Debug, Clone)]
pub struct RecordingView {
    profile: DeviceProfile,
    events: Vec<ViewEvent>,
    profile_queries: Cell<usize>,
}

impl RecordingView {
    pub fn new(profile: DeviceProfile) -> Self {
        Self {
            profile,
            events: Vec::new(),
            profile_queries: Cell::new(0),
        }
    }

    pub fn events(&self) -> &[ViewEvent] {
        &self.events
    }

    /// Take the log, leaving it empty
    pub fn take_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.events)
    }

    /// How many times the presenter asked for the device profile
    pub fn profile_queries(&self) -> usize {
        self.profile_queries.get()
    }

    fn push(&mut self, event: ViewEvent) {
        self.events.push(event);
    }
}

impl DetailView for RecordingView {
    fn device_profile(&self) -> DeviceProfile {
        self.profile_queries.set(self.profile_queries.get() + 1);
        self.profile
    }

    fn apply_layout_hints(&mut self, hints: &LayoutHints) {
        self.push(ViewEvent::ApplyLayoutHints {
            hints: hints.clone(),
        });
    }

    fn load_background_image(&mut self, url: &str) {
        self.push(ViewEvent::LoadBackgroundImage {
            url: url.to_string(),
        });
    }

    fn render_movie(&mut self, media: &MediaRecord) {
        self.push(ViewEvent::RenderMovie {
            id: media.id.clone(),
            title: media.title.clone(),
        });
    }

    fn render_show(&mut self, media: &MediaRecord) {
        self.push(ViewEvent::RenderShow {
            id: media.id.clone(),
            title: media.title.clone(),
        });
    }

    fn show_dialog(&mut self, title_key: &str, message_key: &str) {
        self.push(ViewEvent::ShowDialog {
            title_key: title_key.to_string(),
            message_key: message_key.to_string(),
        });
    }

    fn navigate_staged_loading(
        &mut self,
        media: &MediaRecord,
        transition: Option<&TransitionHint>,
    ) {
        self.push(ViewEvent::NavigateStagedLoading {
            id: media.id.clone(),
            transition: transition.cloned(),
        });
    }

    fn navigate_direct_player(&mut self, media: &MediaRecord) {
        self.push(ViewEvent::NavigateDirectPlayer {
            id: media.id.clone(),
        });
    }

    fn navigate_trailer(&mut self, media: &MediaRecord, url: &str) {
        self.push(ViewEvent::NavigateTrailer {
            id: media.id.clone(),
            url: url.to_string(),
        });
    }

    fn show_health_banner(&mut self, classification_key: &str, seeds: u32, peers: u32) {
        self.push(ViewEvent::ShowHealthBanner {
            classification_key: classification_key.to_string(),
            seeds,
            peers,
        });
    }
}
