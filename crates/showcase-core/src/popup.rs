//! PopupController — the mobile details popup.
//!
//! Independent of the overlay and the sections; it layers above both.
//! Closing runs the exit animation to completion before detaching from
//! the layout, so `close` enters a `Closing` state that `tick` settles.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::content::Track;
use crate::surface::Surface;

const EMPTY_DESCRIPTION: &str = "No description available.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupState {
    Closed,
    Open,
    Closing { until: Instant },
}

pub struct PopupController {
    state: PopupState,
    exit: Duration,
}

impl PopupController {
    pub fn new(exit: Duration) -> Self {
        Self {
            state: PopupState::Closed,
            exit,
        }
    }

    pub fn state(&self) -> PopupState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, PopupState::Open)
    }

    /// Open for the currently selected track, pulled from the playback
    /// controller on demand.  Nothing selected → nothing to show.
    pub fn open<F: Surface>(&mut self, track: Option<&Track>, surface: &mut F) {
        let Some(track) = track else {
            debug!("popup: no track selected, staying closed");
            return;
        };
        let text = if track.description_html.is_empty() {
            EMPTY_DESCRIPTION
        } else {
            track.description_html.as_str()
        };
        surface.set_popup_text(text);
        surface.set_popup_open(true);
        self.state = PopupState::Open;
    }

    /// Start the exit animation; the layout detach happens on `tick`
    /// once the animation has had its time.
    pub fn close<F: Surface>(&mut self, now: Instant, surface: &mut F) {
        if !self.is_open() {
            return;
        }
        surface.set_popup_open(false);
        self.state = PopupState::Closing {
            until: now + self.exit,
        };
    }

    pub fn tick<F: Surface>(&mut self, now: Instant, surface: &mut F) {
        if let PopupState::Closing { until } = self.state {
            if now >= until {
                surface.detach_popup();
                self.state = PopupState::Closed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::OverlayContent;

    #[derive(Default)]
    struct PopupProbe {
        text: String,
        open: Option<bool>,
        detached: bool,
    }

    impl Surface for PopupProbe {
        fn set_section(&mut self, _: usize, _: bool, _: bool) {}
        fn set_overlay_visible(&mut self, _: bool) {}
        fn set_overlay_content(&mut self, _: &OverlayContent) {}
        fn set_popup_open(&mut self, open: bool) {
            self.open = Some(open);
        }
        fn set_popup_text(&mut self, text: &str) {
            self.text = text.to_string();
        }
        fn detach_popup(&mut self) {
            self.detached = true;
        }
        fn set_sound_icon(&mut self, _: bool) {}
        fn set_dot_active(&mut self, _: Option<usize>) {}
        fn set_nav_highlight(&mut self, _: Option<usize>) {}
        fn set_tooltip(&mut self, _: usize, _: bool) {}
    }

    fn track(desc: &str) -> Track {
        Track {
            id: "t0".to_string(),
            source_url: "u".to_string(),
            description_html: desc.to_string(),
            ..Track::default()
        }
    }

    #[test]
    fn test_open_without_selection_is_noop() {
        let mut popup = PopupController::new(Duration::from_millis(300));
        let mut probe = PopupProbe::default();
        popup.open(None, &mut probe);
        assert_eq!(popup.state(), PopupState::Closed);
        assert_eq!(probe.open, None);
    }

    #[test]
    fn test_empty_description_gets_placeholder() {
        let mut popup = PopupController::new(Duration::from_millis(300));
        let mut probe = PopupProbe::default();
        popup.open(Some(&track("")), &mut probe);
        assert!(popup.is_open());
        assert_eq!(probe.text, EMPTY_DESCRIPTION);
    }

    #[test]
    fn test_close_detaches_after_exit_window() {
        let mut popup = PopupController::new(Duration::from_millis(300));
        let mut probe = PopupProbe::default();
        popup.open(Some(&track("hi")), &mut probe);

        let t0 = Instant::now();
        popup.close(t0, &mut probe);
        assert_eq!(probe.open, Some(false));
        assert!(!probe.detached, "must let the exit animation run");

        popup.tick(t0 + Duration::from_millis(100), &mut probe);
        assert!(!probe.detached);
        popup.tick(t0 + Duration::from_millis(300), &mut probe);
        assert!(probe.detached);
        assert_eq!(popup.state(), PopupState::Closed);
    }

    #[test]
    fn test_close_when_closed_is_noop() {
        let mut popup = PopupController::new(Duration::from_millis(300));
        let mut probe = PopupProbe::default();
        popup.close(Instant::now(), &mut probe);
        assert_eq!(popup.state(), PopupState::Closed);
        assert_eq!(probe.open, None);
    }
}
