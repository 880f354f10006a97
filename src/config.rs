use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Font used for lines that don't pick one.
pub const DEFAULT_FONT: &str = "Helvetica";

/// Point size used for lines that don't pick one.
pub const DEFAULT_FONT_SIZE: u32 = 24;

/// Composer configuration: the selectable font set and the size bounds
/// enforced by the size control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default = "default_fonts")]
    pub fonts: Vec<String>,

    #[serde(default = "default_min_font_size")]
    pub min_font_size: u32,

    #[serde(default = "default_max_font_size")]
    pub max_font_size: u32,

    #[serde(default = "default_font_size")]
    pub default_font_size: u32,
}

fn default_fonts() -> Vec<String> {
    vec![DEFAULT_FONT.to_string(), "Times New Roman".to_string()]
}

fn default_min_font_size() -> u32 {
    10
}

fn default_max_font_size() -> u32 {
    60
}

fn default_font_size() -> u32 {
    DEFAULT_FONT_SIZE
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            fonts: default_fonts(),
            min_font_size: default_min_font_size(),
            max_font_size: default_max_font_size(),
            default_font_size: default_font_size(),
        }
    }
}

impl EditorConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;
        let config = serde_json::from_str(&data)
            .with_context(|| format!("failed to parse config from {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let data = serde_json::to_string_pretty(self).context("failed to serialize config")?;
        std::fs::write(path, data)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Size-control boundary: keep a requested size inside the allowed range.
    /// The core line model deliberately does not clamp; the input control does.
    pub fn clamp_size(&self, size: u32) -> u32 {
        size.clamp(self.min_font_size, self.max_font_size)
    }

    /// Font-control boundary: the font after `current` in the enumerated set,
    /// wrapping around. Unknown fonts land on the first entry.
    pub fn font_after(&self, current: &str) -> &str {
        if self.fonts.is_empty() {
            return DEFAULT_FONT;
        }
        match self.fonts.iter().position(|f| f == current) {
            Some(i) => &self.fonts[(i + 1) % self.fonts.len()],
            None => &self.fonts[0],
        }
    }
}
