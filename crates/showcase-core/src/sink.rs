//! The audio sink capability, as consumed by the coordinator.
//!
//! Calls are fire-and-forget: nothing here blocks the event loop, and a
//! refused `play` is not an error return — it comes back later as
//! [`SinkEvent::PlayRejected`], the same way a browser surfaces a
//! rejected play promise.  The sink is owned exclusively by the
//! `PlaybackController`; no other component issues transport calls.

/// Playback transport.  Implementations forward to a real player (mpv
/// over IPC in the front-end) or record calls (tests).
pub trait AudioSink {
    fn load(&mut self, url: &str);
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, secs: f64);
    fn set_volume(&mut self, volume: f32);
    fn set_muted(&mut self, muted: bool);
}

/// Asynchronous notifications from the sink, delivered through the
/// owning event loop in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkEvent {
    /// The current source played to the end.
    Ended,
    /// A previous `play()` was refused (autoplay policy or backend
    /// failure).  Non-fatal: playback stays paused awaiting a gesture.
    PlayRejected,
}
