//! Replay scripts: recorded pointer and toolbar actions in JSON.

use crate::error::AppResult;
use crate::session::{DrawingSession, HistoryStep};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use sketchpad_core::{CommitOutcome, StrokeColor, ToolKind};
use sketchpad_render::Renderer;
use std::path::Path;

/// One user action, as the toolbar and surface would deliver it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up,
    Leave,
    Tool { tool: ToolKind },
    Color { color: StrokeColor },
    Swatch { index: usize },
    Width { width: f64 },
    Undo,
    Redo,
    Clear,
    Reset,
}

/// Counters collected while replaying a script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayReport {
    /// Actions applied.
    pub actions: usize,
    /// Strokes committed to the drawing.
    pub strokes: usize,
    /// Strokes dropped for having a single point.
    pub discarded: usize,
    /// Undo/redo requests that hit either end of history.
    pub history_noops: usize,
}

impl ReplayReport {
    fn record(&mut self, outcome: Option<CommitOutcome>) {
        match outcome {
            Some(CommitOutcome::Kept) => self.strokes += 1,
            Some(CommitOutcome::Discarded(_)) => self.discarded += 1,
            None => {}
        }
    }
}

/// An ordered list of actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub actions: Vec<Action>,
}

impl Script {
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    /// Parse a script from a JSON array of actions.
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a script file.
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Apply every action to `session`, stopping at the first error.
    pub fn replay<R: Renderer>(&self, session: &mut DrawingSession<R>) -> AppResult<ReplayReport> {
        let mut report = ReplayReport::default();
        for action in &self.actions {
            match *action {
                Action::Down { x, y } => session.pointer_down(Point::new(x, y))?,
                Action::Move { x, y } => session.pointer_move(Point::new(x, y))?,
                Action::Up => report.record(session.pointer_up()?),
                Action::Leave => report.record(session.pointer_leave()?),
                Action::Tool { tool } => session.set_tool(tool),
                Action::Color { color } => session.set_color(color),
                Action::Swatch { index } => {
                    session.select_palette_color(index)?;
                }
                Action::Width { width } => session.set_width(width)?,
                Action::Undo => {
                    if session.undo()? == HistoryStep::Underflow {
                        report.history_noops += 1;
                    }
                }
                Action::Redo => {
                    if session.redo()? == HistoryStep::Overflow {
                        report.history_noops += 1;
                    }
                }
                Action::Clear => session.clear()?,
                Action::Reset => session.reset()?,
            }
            report.actions += 1;
        }

        log::info!(
            "Replayed {} actions: {} strokes, {} discarded",
            report.actions,
            report.strokes,
            report.discarded
        );
        Ok(report)
    }
}
