//! Raw input events, as produced by the front-end.
//!
//! Every event lands here and the coordinator routes it, so the whole
//! input surface is unit-testable without a live document.

/// Everything a user can do to the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    /// Click on a track selector dot.
    DotClick(usize),
    /// Pointer entered / left a dot (drives the hover tooltip).
    DotHover { dot: usize, entered: bool },
    /// Click on the sound on/off icon.  The front-end must not also
    /// deliver a `DotClick` for the same press.
    SoundIconClick,
    /// Click on a nav link jumping to a section.
    NavClick(usize),
    /// Wheel movement; positive delta scrolls forward.
    Wheel { delta: f32 },
    /// Completed touch swipe; positive delta moves forward.
    Swipe { delta: f32 },
    /// The mobile "view details" button.
    ViewDetailsClick,
    /// The popup's close button.
    PopupCloseClick,
    /// Any other click on the page — only meaningful as the user gesture
    /// that releases a deferred autoplay retry.
    PageClick,
}

impl Input {
    /// Whether this input counts as a user gesture for autoplay purposes.
    pub fn is_gesture(self) -> bool {
        !matches!(
            self,
            Input::Wheel { .. } | Input::Swipe { .. } | Input::DotHover { .. }
        )
    }
}
