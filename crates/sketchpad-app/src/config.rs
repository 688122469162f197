//! Application configuration.

use crate::error::AppResult;
use serde::{Deserialize, Serialize};
use sketchpad_core::{PALETTE, StrokeColor, ToolSettings};
use std::path::Path;

/// Default surface width in pixels.
pub const DEFAULT_WIDTH: u32 = 800;
/// Default surface height in pixels.
pub const DEFAULT_HEIGHT: u32 = 400;

/// Settings for a drawing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Opaque color the surface is cleared to.
    pub background: StrokeColor,
    /// Tool settings for the first stroke.
    pub tool: ToolSettings,
    /// Swatches selectable by index.
    pub palette: Vec<StrokeColor>,
    /// Maximum number of history snapshots (unbounded when absent).
    pub history_limit: Option<usize>,
    /// Anti-alias stroke edges.
    pub anti_alias: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            background: StrokeColor::WHITE,
            tool: ToolSettings::default(),
            palette: PALETTE.to_vec(),
            history_limit: None,
            anti_alias: true,
        }
    }
}

impl AppConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from: {:?}", path);
        Ok(config)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Set the surface size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, background: StrokeColor) -> Self {
        self.background = background;
        self
    }

    /// Set the initial tool settings.
    pub fn with_tool(mut self, tool: ToolSettings) -> Self {
        self.tool = tool;
        self
    }

    /// Bound the number of history snapshots.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Enable or disable anti-aliasing.
    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }
}
