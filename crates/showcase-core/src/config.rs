use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::platform;

/// Which feature set the page runs with.  Resolved once at startup from
/// config, never re-checked per event: wheel navigation, auto-hide,
/// autoplay-on-load, tooltips and unmute-resume belong to the desktop
/// set; swipe navigation and the details popup to the mobile set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeviceProfile {
    #[default]
    Desktop,
    Mobile,
}

impl DeviceProfile {
    pub fn is_mobile(self) -> bool {
        matches!(self, DeviceProfile::Mobile)
    }
}

/// What the first dot tap does on mobile when nothing is selected yet.
///
/// The deployed mobile build swallowed that tap entirely; whether that
/// was intentional is unknown, so both behaviours are kept selectable.
/// `Arm` selects and loads the track without starting audio; `Play`
/// starts it immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FirstTapPolicy {
    #[default]
    Play,
    Arm,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub profile: DeviceProfile,
    /// How long the music-details overlay stays up before auto-hiding.
    /// 8000 in the canonical build, 5000 in the mobile-optimised one.
    /// Ignored on the mobile profile, which has no auto-hide timer.
    #[serde(default = "default_auto_hide_ms")]
    pub auto_hide_ms: u64,
    /// Window during which further section transitions are rejected.
    #[serde(default = "default_debounce_ms")]
    pub transition_debounce_ms: u64,
    /// Exit-animation settle time before the popup detaches.
    #[serde(default = "default_popup_exit_ms")]
    pub popup_exit_ms: u64,
    /// Mirror description/meta text into the popup-bound fields whenever
    /// the overlay content changes.
    #[serde(default = "default_mirror")]
    pub mirror_popup_text: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    #[serde(default = "default_volume")]
    pub volume: f32,
    /// Start the first track automatically on load (desktop only — the
    /// mobile profile always waits for a user gesture).
    #[serde(default = "default_autoplay")]
    pub autoplay_on_load: bool,
    #[serde(default)]
    pub first_tap: FirstTapPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Minimum swipe travel before it counts as a section gesture.
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Sections + tracks content file.
    #[serde(default = "default_content_file")]
    pub content_file: PathBuf,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            profile: DeviceProfile::Desktop,
            auto_hide_ms: default_auto_hide_ms(),
            transition_debounce_ms: default_debounce_ms(),
            popup_exit_ms: default_popup_exit_ms(),
            mirror_popup_text: default_mirror(),
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            autoplay_on_load: default_autoplay(),
            first_tap: FirstTapPolicy::Play,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: default_swipe_threshold(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content_file: default_content_file(),
        }
    }
}

fn default_auto_hide_ms() -> u64 {
    8000
}

fn default_debounce_ms() -> u64 {
    800
}

fn default_popup_exit_ms() -> u64 {
    300
}

fn default_mirror() -> bool {
    true
}

fn default_volume() -> f32 {
    0.5
}

fn default_autoplay() -> bool {
    true
}

fn default_swipe_threshold() -> f32 {
    40.0
}

fn default_content_file() -> PathBuf {
    platform::config_dir().join("content.toml")
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }

    pub fn auto_hide(&self) -> Duration {
        Duration::from_millis(self.display.auto_hide_ms)
    }

    pub fn transition_debounce(&self) -> Duration {
        Duration::from_millis(self.display.transition_debounce_ms)
    }

    pub fn popup_exit(&self) -> Duration {
        Duration::from_millis(self.display.popup_exit_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.display.profile, DeviceProfile::Desktop);
        assert_eq!(config.display.auto_hide_ms, 8000);
        assert_eq!(config.display.transition_debounce_ms, 800);
        assert_eq!(config.playback.first_tap, FirstTapPolicy::Play);
        assert!(config.playback.autoplay_on_load);
        assert!((config.playback.volume - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [display]
            profile = "mobile"
            auto_hide_ms = 5000
            "#,
        )
        .unwrap();
        assert!(config.display.profile.is_mobile());
        assert_eq!(config.display.auto_hide_ms, 5000);
        assert_eq!(config.display.transition_debounce_ms, 800);
        assert!(config.display.mirror_popup_text);
    }
}
