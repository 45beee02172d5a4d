//! Coordinator — wires the four controllers together and routes input.
//!
//! This is the only place controllers talk to each other, and they do it
//! through their public operations: the router never reaches into
//! another controller's state.  One instance owns the sink and the
//! surface for the life of the page; the front-end's event loop feeds it
//! `handle`, `on_sink_event`, and `tick` strictly in arrival order.

use std::time::Instant;

use tracing::debug;

use crate::config::{Config, DeviceProfile};
use crate::content::Content;
use crate::input::Input;
use crate::overlay::OverlayCoordinator;
use crate::playback::{PlaybackController, PlaybackEvent};
use crate::popup::PopupController;
use crate::sections::SectionNavigator;
use crate::sink::{AudioSink, SinkEvent};
use crate::surface::Surface;

pub struct Coordinator<S: AudioSink, F: Surface> {
    profile: DeviceProfile,
    autoplay_on_load: bool,
    swipe_threshold: f32,

    playback: PlaybackController<S>,
    overlay: OverlayCoordinator,
    sections: SectionNavigator,
    popup: PopupController,
    surface: F,
}

impl<S: AudioSink, F: Surface> Coordinator<S, F> {
    pub fn new(config: &Config, content: Content, sink: S, mut surface: F) -> Self {
        let profile = config.display.profile;
        let playback = PlaybackController::new(
            sink,
            content.tracks,
            profile,
            config.playback.first_tap,
            config.playback.volume,
        );
        let mut sections = SectionNavigator::new(
            content.sections.len(),
            config.transition_debounce(),
            profile,
        );
        let overlay = OverlayCoordinator::new(
            config.auto_hide(),
            profile,
            config.display.mirror_popup_text,
        );
        let popup = PopupController::new(config.popup_exit());

        // Initial presentation state: section 0 up, everything else down.
        sections.init(&mut surface);
        surface.set_overlay_visible(false);
        surface.detach_popup();
        surface.set_sound_icon(true);
        surface.set_dot_active(None);

        Self {
            profile,
            autoplay_on_load: config.playback.autoplay_on_load,
            swipe_threshold: config.input.swipe_threshold,
            playback,
            overlay,
            sections,
            popup,
            surface,
        }
    }

    /// Content loaded: kick off the default track, desktop only — on
    /// mobile no audio call may happen before a user gesture.
    pub fn start(&mut self, _now: Instant) {
        if self.profile.is_mobile() || !self.autoplay_on_load {
            return;
        }
        if self.playback.track_count() > 0 {
            // Forced selection: no TrackChanged, so the overlay stays
            // down on page load.
            let event = self.playback.select_track(0, true, &mut self.surface);
            debug_assert!(event.is_none());
        }
    }

    pub fn handle(&mut self, input: Input, now: Instant) {
        debug!("input: {:?}", input);
        // A dot click goes straight to its own handler, which supersedes
        // any pending retry (a paused dot resumes, it never toggle-stops
        // through a retry firing first).  Every other gesture releases
        // the retry here.
        if input.is_gesture() && !matches!(input, Input::DotClick(_)) {
            self.playback.on_user_gesture();
        }

        match input {
            Input::DotClick(idx) => {
                if let Some(event) = self.playback.select_track(idx, false, &mut self.surface) {
                    self.apply_playback_event(event, now);
                }
            }
            Input::SoundIconClick => {
                self.playback.toggle_mute(&mut self.surface);
            }
            Input::NavClick(target) => {
                // Clamp at the boundary; the navigator's range check is
                // only a backstop for programming errors.
                let count = self.sections.count();
                let target = target.min(count - 1);
                self.overlay
                    .hide(true, &mut self.sections, &mut self.surface);
                let _ = self.sections.go_to(target, now, &mut self.surface);
            }
            Input::Wheel { delta } => {
                if self.profile.is_mobile() || delta == 0.0 {
                    return;
                }
                self.scroll(delta, now);
            }
            Input::Swipe { delta } => {
                if !self.profile.is_mobile() || delta.abs() < self.swipe_threshold {
                    return;
                }
                self.scroll(delta, now);
            }
            Input::ViewDetailsClick => {
                if self.profile.is_mobile() {
                    self.popup
                        .open(self.playback.selected_track(), &mut self.surface);
                }
            }
            Input::PopupCloseClick => {
                self.popup.close(now, &mut self.surface);
            }
            Input::DotHover { dot, entered } => {
                if !self.profile.is_mobile() && dot < self.playback.track_count() {
                    self.surface.set_tooltip(dot, entered);
                }
            }
            Input::PageClick => {
                // Gesture handling above is all this is for.
            }
        }
    }

    pub fn on_sink_event(&mut self, event: SinkEvent) {
        self.playback.on_sink_event(event);
    }

    /// Advance stored deadlines: overlay auto-hide, popup exit settle.
    pub fn tick(&mut self, now: Instant) {
        self.overlay
            .tick(now, &mut self.sections, &mut self.surface);
        self.popup.tick(now, &mut self.surface);
    }

    fn apply_playback_event(&mut self, event: PlaybackEvent, now: Instant) {
        match event {
            PlaybackEvent::TrackChanged(idx) => {
                if let Some(track) = self.playback.track(idx).cloned() {
                    self.overlay
                        .show(&track, now, &mut self.sections, &mut self.surface);
                }
            }
            PlaybackEvent::TrackStopped => {
                self.overlay
                    .hide(true, &mut self.sections, &mut self.surface);
            }
        }
    }

    /// Shared wheel/swipe path: the overlay always comes down first
    /// (even when the step is swallowed by the debounce window or
    /// clamped at an edge), then the navigator takes the step.
    fn scroll(&mut self, delta: f32, now: Instant) {
        self.overlay
            .hide(true, &mut self.sections, &mut self.surface);
        self.sections.scroll(delta, now, &mut self.surface);
    }

    // ── Read-only views for the front-end and tests ──────────────────────

    pub fn surface(&self) -> &F {
        &self.surface
    }

    pub fn playback(&self) -> &PlaybackController<S> {
        &self.playback
    }

    pub fn overlay(&self) -> &OverlayCoordinator {
        &self.overlay
    }

    pub fn sections(&self) -> &SectionNavigator {
        &self.sections
    }

    pub fn popup(&self) -> &PopupController {
        &self.popup
    }
}
