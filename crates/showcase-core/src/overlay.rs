//! OverlayCoordinator — the music-details panel and its auto-hide timer.
//!
//! A small state machine: `Hidden` or `Showing(deadline)`.  The deadline
//! is a stored `Instant` checked by `tick`, so cancelling is just
//! dropping it — a superseded timer cannot fire.  Re-showing while
//! already up replaces the deadline; timers never stack.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config::DeviceProfile;
use crate::content::Track;
use crate::sections::SectionNavigator;
use crate::surface::{OverlayContent, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OverlayState {
    Hidden,
    Showing { deadline: Option<Instant> },
}

pub struct OverlayCoordinator {
    state: OverlayState,
    /// `None` disables auto-hide (mobile profile).
    auto_hide: Option<Duration>,
    /// Whether opening the overlay takes the hero sections down with it.
    /// The mobile layout keeps them static underneath.
    suspends_sections: bool,
    mirror_popup_text: bool,
}

impl OverlayCoordinator {
    pub fn new(auto_hide: Duration, profile: DeviceProfile, mirror_popup_text: bool) -> Self {
        Self {
            state: OverlayState::Hidden,
            auto_hide: (!profile.is_mobile()).then_some(auto_hide),
            suspends_sections: !profile.is_mobile(),
            mirror_popup_text,
        }
    }

    pub fn is_showing(&self) -> bool {
        matches!(self.state, OverlayState::Showing { .. })
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            OverlayState::Showing { deadline } => deadline,
            OverlayState::Hidden => None,
        }
    }

    /// A track was picked: populate the panel and show it.
    pub fn show<F: Surface>(
        &mut self,
        track: &Track,
        now: Instant,
        sections: &mut SectionNavigator,
        surface: &mut F,
    ) {
        info!("overlay: showing '{}'", track.title);
        surface.set_overlay_content(&OverlayContent {
            title: track.title.clone(),
            artist: track.artist.clone(),
            description_html: track.description_html.clone(),
            meta_text: track.meta_text.clone(),
        });
        if self.mirror_popup_text {
            surface.set_popup_text(&track.description_html);
        }

        if self.suspends_sections {
            sections.suspend(surface);
        }
        surface.set_overlay_visible(true);

        // Replaces any earlier deadline — never stacks.
        self.state = OverlayState::Showing {
            deadline: self.auto_hide.map(|d| now + d),
        };
    }

    /// Close the panel.  Idempotent; safe while already hidden.
    pub fn hide<F: Surface>(
        &mut self,
        instant: bool,
        sections: &mut SectionNavigator,
        surface: &mut F,
    ) {
        if !self.is_showing() {
            if instant {
                // Re-signal so a half-initialised panel cannot linger.
                surface.set_overlay_visible(false);
            }
            return;
        }
        debug!("overlay: hiding (instant={})", instant);
        self.state = OverlayState::Hidden;
        surface.set_overlay_visible(false);
        if self.suspends_sections {
            sections.resume(surface);
        }
    }

    /// Auto-hide check; call on every loop tick.
    pub fn tick<F: Surface>(
        &mut self,
        now: Instant,
        sections: &mut SectionNavigator,
        surface: &mut F,
    ) {
        if let OverlayState::Showing {
            deadline: Some(deadline),
        } = self.state
        {
            if now >= deadline {
                debug!("overlay: auto-hide deadline reached");
                self.hide(false, sections, surface);
            }
        }
    }
}
