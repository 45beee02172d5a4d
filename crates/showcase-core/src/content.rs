//! Static page content: hero sections and the selectable track list.
//!
//! The host page provides these as a fixed, ordered list at load time;
//! here they come from a TOML file next to the config.  Read-only after
//! startup.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use crate::error::CoreError;

/// One selectable track, as carried by a player dot.  Identity is by
/// `source_url`: selecting a dot whose URL is already loaded does not
/// reload the sink.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Track {
    pub id: String,
    pub source_url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub description_html: String,
    #[serde(default)]
    pub meta_text: String,
}

/// One full-viewport hero section.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Section {
    pub name: String,
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub paragraph: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl Content {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let content: Self =
            toml::from_str(raw).map_err(|e| CoreError::InvalidContent(e.to_string()))?;
        if content.sections.is_empty() {
            return Err(CoreError::InvalidContent(
                "content defines no sections".to_string(),
            ));
        }
        Ok(content)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(Self::parse(&raw)?)
    }

    /// Load the content file, falling back to the built-in demo content
    /// when the file is missing or broken.  A broken content file must
    /// not take the page down.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            let content = Self::default();
            if let Err(e) = content.save(path) {
                warn!("content: could not write default file: {}", e);
            }
            return content;
        }
        match Self::load(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("content: {} — using built-in defaults", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

impl Default for Content {
    fn default() -> Self {
        Self {
            sections: vec![
                Section {
                    name: "intro".to_string(),
                    heading: "a new kind of listening".to_string(),
                    paragraph: "Scroll to explore, or pick a dot to hear the music.".to_string(),
                },
                Section {
                    name: "why".to_string(),
                    heading: "why".to_string(),
                    paragraph: "Because a page can be a place.".to_string(),
                },
                Section {
                    name: "what".to_string(),
                    heading: "what".to_string(),
                    paragraph: "Three rooms, one song at a time.".to_string(),
                },
            ],
            tracks: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_content() {
        let content = Content::parse(
            r#"
            [[sections]]
            name = "intro"
            heading = "hello"

            [[sections]]
            name = "why"

            [[tracks]]
            id = "t0"
            source_url = "https://example.com/a.mp3"
            title = "First"
            artist = "Someone"
            "#,
        )
        .unwrap();
        assert_eq!(content.sections.len(), 2);
        assert_eq!(content.tracks.len(), 1);
        assert_eq!(content.tracks[0].source_url, "https://example.com/a.mp3");
        assert!(content.tracks[0].meta_text.is_empty());
    }

    #[test]
    fn test_empty_sections_rejected() {
        let err = Content::parse("[[tracks]]\nid = \"t\"\nsource_url = \"u\"\n").unwrap_err();
        assert!(matches!(err, CoreError::InvalidContent(_)));
    }

    #[test]
    fn test_default_has_three_sections() {
        let content = Content::default();
        assert_eq!(content.sections.len(), 3);
        assert!(content.tracks.is_empty());
    }
}
