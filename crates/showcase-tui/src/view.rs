//! TermSurface — the coordinator's `Surface` applied to a view model.
//!
//! The core emits visibility signals; this collects them into a
//! `ViewState` that the draw code reads each frame.  No logic lives
//! here beyond recording the latest signal per region.

use showcase_core::surface::{OverlayContent, Surface};

#[derive(Debug, Clone, Copy, Default)]
pub struct SectionVisual {
    pub visible: bool,
    /// Whether the last change skipped easing.  The terminal renders a
    /// fade as a brief dim frame; instant changes skip it.
    pub instant: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub sections: Vec<SectionVisual>,
    pub overlay_visible: bool,
    pub overlay: OverlayContent,
    pub popup_open: bool,
    pub popup_attached: bool,
    pub popup_text: String,
    pub sound_on: bool,
    pub dot_active: Option<usize>,
    pub nav_highlight: Option<usize>,
    pub tooltips: Vec<bool>,
}

#[derive(Debug, Default)]
pub struct TermSurface {
    pub view: ViewState,
}

impl Surface for TermSurface {
    fn set_section(&mut self, index: usize, visible: bool, instant: bool) {
        if self.view.sections.len() <= index {
            self.view.sections.resize_with(index + 1, Default::default);
        }
        self.view.sections[index] = SectionVisual { visible, instant };
    }

    fn set_overlay_visible(&mut self, visible: bool) {
        self.view.overlay_visible = visible;
    }

    fn set_overlay_content(&mut self, content: &OverlayContent) {
        self.view.overlay = content.clone();
    }

    fn set_popup_open(&mut self, open: bool) {
        self.view.popup_open = open;
        if open {
            self.view.popup_attached = true;
        }
    }

    fn set_popup_text(&mut self, text: &str) {
        self.view.popup_text = text.to_string();
    }

    fn detach_popup(&mut self) {
        self.view.popup_attached = false;
    }

    fn set_sound_icon(&mut self, on: bool) {
        self.view.sound_on = on;
    }

    fn set_dot_active(&mut self, dot: Option<usize>) {
        self.view.dot_active = dot;
    }

    fn set_nav_highlight(&mut self, section: Option<usize>) {
        self.view.nav_highlight = section;
    }

    fn set_tooltip(&mut self, dot: usize, visible: bool) {
        if self.view.tooltips.len() <= dot {
            self.view.tooltips.resize(dot + 1, false);
        }
        self.view.tooltips[dot] = visible;
    }
}
