//! The presentation surface: the only output of the coordinator.
//!
//! The coordinator never decides colour or position — it emits logical
//! visibility signals and content updates, and the front-end maps them
//! onto whatever it renders with.  Signals are idempotent: emitting the
//! same state twice must be harmless.

/// Content fields for the music-details overlay.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverlayContent {
    pub title: String,
    pub artist: String,
    pub description_html: String,
    pub meta_text: String,
}

pub trait Surface {
    /// Show or hide one hero section.  `instant` suppresses easing so an
    /// in-flight transition cannot visually race the overlay.
    fn set_section(&mut self, index: usize, visible: bool, instant: bool);

    fn set_overlay_visible(&mut self, visible: bool);
    fn set_overlay_content(&mut self, content: &OverlayContent);

    /// Popup open/close drives the enter/exit animation; `detach_popup`
    /// removes it from the layout once the exit animation has settled.
    fn set_popup_open(&mut self, open: bool);
    fn set_popup_text(&mut self, text: &str);
    fn detach_popup(&mut self);

    /// `true` = the sound-on icon, `false` = the sound-off icon.
    fn set_sound_icon(&mut self, on: bool);

    /// Which selector dot is marked active, if any.
    fn set_dot_active(&mut self, dot: Option<usize>);

    /// Nav-link highlight for the jump targets (sections 1 and 2).
    fn set_nav_highlight(&mut self, section: Option<usize>);

    /// Per-dot hover tooltip (desktop only).
    fn set_tooltip(&mut self, dot: usize, visible: bool);
}
