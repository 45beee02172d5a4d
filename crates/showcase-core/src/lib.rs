//! Display-state coordinator for a single-page music showcase.
//!
//! The page has three full-viewport "hero" sections navigated by
//! scroll/swipe/nav-click, a looping background audio player driven by
//! per-track selector dots, a music-details overlay that appears when a
//! track is picked, and a mobile-only details popup.  This crate owns the
//! rules that decide which of those overlapping regions is visible at any
//! instant and how playback state interacts with that visibility.
//!
//! Architecture:
//!
//! ```text
//!   Input ──► Coordinator (router)
//!               ├── PlaybackController ──► AudioSink   (exclusive owner)
//!               ├── OverlayCoordinator ─┐
//!               ├── SectionNavigator ◄──┘ (suspend / resume)
//!               └── PopupController
//!                        │
//!                        └──► Surface (visibility signals only)
//! ```
//!
//! Everything is synchronous and deterministic: timers are stored
//! deadlines checked by an explicit `tick(now)`, so a superseded timer can
//! never fire late.  The front-end owns the event loop and feeds inputs,
//! sink events, and ticks in arrival order.

pub mod config;
pub mod content;
pub mod coordinator;
pub mod error;
pub mod input;
pub mod overlay;
pub mod platform;
pub mod playback;
pub mod popup;
pub mod sections;
pub mod sink;
pub mod surface;

pub use config::{Config, DeviceProfile, FirstTapPolicy};
pub use content::{Content, Section, Track};
pub use coordinator::Coordinator;
pub use error::CoreError;
pub use input::Input;
pub use sink::{AudioSink, SinkEvent};
pub use surface::{OverlayContent, Surface};
