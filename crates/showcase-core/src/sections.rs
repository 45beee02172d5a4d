//! SectionNavigator — which hero section is on screen.
//!
//! Exactly one section index is active at all times.  While the overlay
//! owns the viewport the sections are all hidden but the index is
//! retained; `resume` re-shows it when the overlay closes.  Transitions
//! are mutually exclusive: a debounce window rejects further moves while
//! one is in flight, so rapid wheel ticks cannot race opacities.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::DeviceProfile;
use crate::error::CoreError;
use crate::surface::Surface;

pub struct SectionNavigator {
    active: usize,
    count: usize,
    debounce: Duration,
    /// End of the current transition window; `None` when idle.
    debounce_until: Option<Instant>,
    /// Desktop eases transitions; the mobile layout flips visibility
    /// instantly.
    eased: bool,
}

impl SectionNavigator {
    pub fn new(count: usize, debounce: Duration, profile: DeviceProfile) -> Self {
        Self {
            active: 0,
            count: count.max(1),
            debounce,
            debounce_until: None,
            eased: !profile.is_mobile(),
        }
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// True while a transition animation owns the sections.
    pub fn transition_in_flight(&self, now: Instant) -> bool {
        self.debounce_until.is_some_and(|until| now < until)
    }

    /// Jump to a section.  Same-index and mid-transition requests are
    /// no-ops; out-of-range is a programming error rejected here as a
    /// backstop (the router clamps before calling).
    /// Returns whether a transition actually started.
    pub fn go_to<F: Surface>(
        &mut self,
        index: usize,
        now: Instant,
        surface: &mut F,
    ) -> Result<bool, CoreError> {
        if index >= self.count {
            warn!("sections: rejected out-of-range index {}", index);
            return Err(CoreError::InvalidSection {
                index,
                count: self.count,
            });
        }
        if index == self.active || self.transition_in_flight(now) {
            return Ok(false);
        }
        debug!("sections: {} -> {}", self.active, index);
        self.begin_transition(index, now, surface);
        Ok(true)
    }

    /// Wheel/swipe step: forward for positive delta, back otherwise,
    /// clamped at the edges.  Arms the debounce window even when clamped
    /// (a wheel tick at the boundary still swallows the next 800ms of
    /// deltas, matching the page's scroll feel).
    pub fn scroll<F: Surface>(&mut self, delta: f32, now: Instant, surface: &mut F) {
        if self.transition_in_flight(now) {
            return;
        }
        let target = if delta > 0.0 {
            (self.active + 1).min(self.count - 1)
        } else {
            self.active.saturating_sub(1)
        };
        if target == self.active {
            self.debounce_until = Some(now + self.debounce);
            return;
        }
        debug!("sections: scroll {} -> {}", self.active, target);
        self.begin_transition(target, now, surface);
    }

    pub fn next<F: Surface>(&mut self, now: Instant, surface: &mut F) {
        self.scroll(1.0, now, surface);
    }

    pub fn previous<F: Surface>(&mut self, now: Instant, surface: &mut F) {
        self.scroll(-1.0, now, surface);
    }

    /// Overlay opening: hide everything.  The active section goes
    /// instantly so a half-finished ease cannot bleed through the
    /// overlay; the rest follow their normal fade.
    pub fn suspend<F: Surface>(&mut self, surface: &mut F) {
        for i in 0..self.count {
            surface.set_section(i, false, i == self.active);
        }
    }

    /// Overlay closed: put the retained active section back.
    pub fn resume<F: Surface>(&mut self, surface: &mut F) {
        surface.set_section(self.active, true, !self.eased);
    }

    /// Emit the initial visibility state for every section.
    pub fn init<F: Surface>(&mut self, surface: &mut F) {
        for i in 0..self.count {
            surface.set_section(i, i == self.active, true);
        }
        surface.set_nav_highlight(None);
    }

    fn begin_transition<F: Surface>(&mut self, index: usize, now: Instant, surface: &mut F) {
        let instant = !self.eased;
        surface.set_section(self.active, false, instant);
        surface.set_section(index, true, instant);
        self.active = index;
        self.debounce_until = Some(now + self.debounce);
        // Jump targets 1 and 2 have nav links; section 0 clears both.
        surface.set_nav_highlight(if index > 0 { Some(index) } else { None });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::OverlayContent;

    #[derive(Default)]
    struct NullSurface;

    impl Surface for NullSurface {
        fn set_section(&mut self, _: usize, _: bool, _: bool) {}
        fn set_overlay_visible(&mut self, _: bool) {}
        fn set_overlay_content(&mut self, _: &OverlayContent) {}
        fn set_popup_open(&mut self, _: bool) {}
        fn set_popup_text(&mut self, _: &str) {}
        fn detach_popup(&mut self) {}
        fn set_sound_icon(&mut self, _: bool) {}
        fn set_dot_active(&mut self, _: Option<usize>) {}
        fn set_nav_highlight(&mut self, _: Option<usize>) {}
        fn set_tooltip(&mut self, _: usize, _: bool) {}
    }

    fn nav() -> SectionNavigator {
        SectionNavigator::new(3, Duration::from_millis(800), DeviceProfile::Desktop)
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut n = nav();
        let mut s = NullSurface;
        let err = n.go_to(3, Instant::now(), &mut s).unwrap_err();
        assert!(matches!(err, CoreError::InvalidSection { index: 3, count: 3 }));
        assert_eq!(n.active_index(), 0);
    }

    #[test]
    fn test_scroll_clamps_at_edges() {
        let mut n = nav();
        let mut s = NullSurface;
        let t0 = Instant::now();
        n.previous(t0, &mut s);
        assert_eq!(n.active_index(), 0);
        // Boundary tick still armed the window.
        assert!(n.transition_in_flight(t0 + Duration::from_millis(100)));

        let t1 = t0 + Duration::from_secs(10);
        n.next(t1, &mut s);
        let t2 = t1 + Duration::from_secs(10);
        n.next(t2, &mut s);
        let t3 = t2 + Duration::from_secs(10);
        n.next(t3, &mut s);
        assert_eq!(n.active_index(), 2);
    }

    #[test]
    fn test_debounce_swallows_rapid_steps() {
        let mut n = nav();
        let mut s = NullSurface;
        let t0 = Instant::now();
        for ms in [0u64, 10, 50, 200, 700] {
            n.next(t0 + Duration::from_millis(ms), &mut s);
        }
        assert_eq!(n.active_index(), 1);
        // Past the window the next step lands.
        n.next(t0 + Duration::from_millis(900), &mut s);
        assert_eq!(n.active_index(), 2);
    }

    #[test]
    fn test_same_index_is_noop() {
        let mut n = nav();
        let mut s = NullSurface;
        let t0 = Instant::now();
        assert!(!n.go_to(0, t0, &mut s).unwrap());
        assert!(!n.transition_in_flight(t0));
    }
}
