//! PlaybackController — owns track selection, mute, and play intent.
//!
//! The single audio sink lives here and nowhere else.  All transport
//! calls are fire-and-forget; a refused `play` arrives back later as
//! `SinkEvent::PlayRejected` and degrades to "paused, awaiting the next
//! user gesture" rather than surfacing an error.

use tracing::{debug, info};

use crate::config::{DeviceProfile, FirstTapPolicy};
use crate::content::Track;
use crate::sink::{AudioSink, SinkEvent};
use crate::surface::Surface;

/// Emitted to the rest of the coordinator after a state change.
/// `TrackChanged` pops the overlay; autoplay selections deliberately
/// emit nothing so an auto-continuation can never pop it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    TrackChanged(usize),
    TrackStopped,
}

pub struct PlaybackController<S: AudioSink> {
    sink: S,
    tracks: Vec<Track>,
    profile: DeviceProfile,
    first_tap: FirstTapPolicy,

    selected: Option<usize>,
    is_playing: bool,
    is_muted: bool,
    /// Source the sink currently has loaded.  Re-selecting the same URL
    /// must not reload or rewind it.
    loaded_url: Option<String>,
    /// One-shot: retry `play()` on the next user gesture after a
    /// rejection.  Never installed on mobile.
    retry_on_gesture: bool,
}

impl<S: AudioSink> PlaybackController<S> {
    pub fn new(
        mut sink: S,
        tracks: Vec<Track>,
        profile: DeviceProfile,
        first_tap: FirstTapPolicy,
        volume: f32,
    ) -> Self {
        sink.set_volume(volume);
        sink.set_muted(false);
        Self {
            sink,
            tracks,
            profile,
            first_tap,
            selected: None,
            is_playing: false,
            is_muted: false,
            loaded_url: None,
            retry_on_gesture: false,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn track(&self, idx: usize) -> Option<&Track> {
        self.tracks.get(idx)
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.selected.and_then(|i| self.tracks.get(i))
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_muted(&self) -> bool {
        self.is_muted
    }

    /// Select a dot.  Clicking the already-playing dot is a toggle-stop;
    /// anything else loads (if needed) and requests playback.
    /// `autoplay` marks forced/auto-continuation selections: they never
    /// toggle-stop and never emit `TrackChanged`.
    pub fn select_track<F: Surface>(
        &mut self,
        idx: usize,
        autoplay: bool,
        surface: &mut F,
    ) -> Option<PlaybackEvent> {
        let Some(track) = self.tracks.get(idx) else {
            // No such dot — the sub-feature stays inert, but the click
            // still counts as a page gesture for a pending retry.
            debug!("playback: ignoring selection of missing track {}", idx);
            self.on_user_gesture();
            return None;
        };
        let track = track.clone();
        // An explicit selection supersedes any pending retry.
        self.retry_on_gesture = false;

        if !autoplay && self.selected == Some(idx) && self.is_playing {
            info!("playback: toggle-stop '{}'", track.title);
            self.sink.pause();
            self.sink.seek(0.0);
            self.selected = None;
            self.is_playing = false;
            surface.set_dot_active(None);
            return Some(PlaybackEvent::TrackStopped);
        }

        // Mobile arm-on-first-tap: with nothing selected yet, the first
        // tap only selects and loads; audio starts on the next tap.
        if self.profile.is_mobile()
            && self.first_tap == FirstTapPolicy::Arm
            && !autoplay
            && !self.is_playing
            && self.selected.is_none()
        {
            info!("playback: arming '{}' without playback", track.title);
            self.load_if_needed(&track);
            self.selected = Some(idx);
            surface.set_dot_active(Some(idx));
            return None;
        }

        self.load_if_needed(&track);
        self.sink.set_muted(self.is_muted);
        self.sink.play();
        self.selected = Some(idx);
        self.is_playing = true;
        surface.set_dot_active(Some(idx));

        if autoplay {
            debug!("playback: autoplay '{}' (no overlay)", track.title);
            None
        } else {
            info!("playback: playing '{}' — {}", track.title, track.artist);
            Some(PlaybackEvent::TrackChanged(idx))
        }
    }

    /// Flip the mute flag.  Unmuting while a track exists but playback
    /// is paused resumes it — desktop only; mobile never auto-resumes.
    pub fn toggle_mute<F: Surface>(&mut self, surface: &mut F) {
        self.is_muted = !self.is_muted;
        self.sink.set_muted(self.is_muted);
        if !self.is_muted
            && !self.profile.is_mobile()
            && self.selected.is_some()
            && !self.is_playing
        {
            debug!("playback: unmute resumes paused track");
            self.sink.play();
            self.is_playing = true;
        }
        surface.set_sound_icon(!self.is_muted);
    }

    pub fn on_sink_event(&mut self, event: SinkEvent) {
        match event {
            SinkEvent::Ended => {
                // Infinite loop: rewind and keep going.  Not a state
                // change anyone else observes.
                self.sink.seek(0.0);
                self.sink.play();
            }
            SinkEvent::PlayRejected => {
                debug!("playback: play rejected, awaiting user gesture");
                self.is_playing = false;
                if !self.profile.is_mobile() {
                    self.retry_on_gesture = true;
                }
            }
        }
    }

    /// Any click anywhere releases a pending autoplay retry (one-shot).
    pub fn on_user_gesture(&mut self) {
        if self.retry_on_gesture {
            self.retry_on_gesture = false;
            if self.selected.is_some() {
                info!("playback: retrying play after user gesture");
                self.sink.play();
                self.is_playing = true;
            }
        }
    }

    fn load_if_needed(&mut self, track: &Track) {
        if self.loaded_url.as_deref() != Some(track.source_url.as_str()) {
            self.sink.load(&track.source_url);
            self.sink.seek(0.0);
            self.loaded_url = Some(track.source_url.clone());
        }
    }

    /// Whether a one-shot gesture retry is armed.
    pub fn retry_pending(&self) -> bool {
        self.retry_on_gesture
    }
}
