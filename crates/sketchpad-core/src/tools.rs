//! Drawing tools and the settings applied to new strokes.

use crate::error::{DrawError, DrawResult};
use crate::path::StrokeColor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Preset swatches offered by the toolbar.
pub const PALETTE: [StrokeColor; 12] = [
    StrokeColor::rgb(0x00, 0x00, 0x00),
    StrokeColor::rgb(0x37, 0x41, 0x51),
    StrokeColor::rgb(0xDC, 0x26, 0x26),
    StrokeColor::rgb(0xEA, 0x58, 0x0C),
    StrokeColor::rgb(0xD9, 0x77, 0x06),
    StrokeColor::rgb(0x65, 0xA3, 0x0D),
    StrokeColor::rgb(0x05, 0x96, 0x69),
    StrokeColor::rgb(0x08, 0x91, 0xB2),
    StrokeColor::rgb(0x25, 0x63, 0xEB),
    StrokeColor::rgb(0x7C, 0x3A, 0xED),
    StrokeColor::rgb(0xC0, 0x26, 0xD3),
    StrokeColor::rgb(0xEC, 0x48, 0x99),
];

/// Default stroke width in pixels.
pub const DEFAULT_WIDTH: f64 = 3.0;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pen,
    Eraser,
}

impl ToolKind {
    /// Tag used in configuration and scripts.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pen => "pen",
            ToolKind::Eraser => "eraser",
        }
    }

    /// Whether strokes of this tool remove coverage instead of painting.
    pub fn erases(self) -> bool {
        matches!(self, ToolKind::Eraser)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pen" => Ok(ToolKind::Pen),
            "eraser" => Ok(ToolKind::Eraser),
            other => Err(DrawError::InvalidStrokeConfig(format!(
                "unsupported tool '{}'",
                other
            ))),
        }
    }
}

/// Tool, color and width read before each new stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    pub tool: ToolKind,
    #[serde(default)]
    pub color: StrokeColor,
    #[serde(default = "default_width")]
    pub width: f64,
}

fn default_width() -> f64 {
    DEFAULT_WIDTH
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            tool: ToolKind::Pen,
            color: StrokeColor::BLACK,
            width: DEFAULT_WIDTH,
        }
    }
}

impl ToolSettings {
    pub fn new(tool: ToolKind, color: StrokeColor, width: f64) -> Self {
        Self { tool, color, width }
    }

    /// Build settings from untyped tags, as received from a toolbar or script.
    pub fn from_tags(tool: &str, color: &str, width: f64) -> DrawResult<Self> {
        let settings = Self::new(tool.parse()?, color.parse()?, width);
        settings.validate()?;
        Ok(settings)
    }

    pub fn with_tool(mut self, tool: ToolKind) -> Self {
        self.tool = tool;
        self
    }

    pub fn with_color(mut self, color: StrokeColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Check the settings can open a stroke.
    pub fn validate(&self) -> DrawResult<()> {
        validate_width(self.width)
    }
}

pub(crate) fn validate_width(width: f64) -> DrawResult<()> {
    if width.is_finite() && width > 0.0 {
        Ok(())
    } else {
        Err(DrawError::InvalidStrokeConfig(format!(
            "stroke width must be a positive number, got {}",
            width
        )))
    }
}
