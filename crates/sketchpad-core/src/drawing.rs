//! Drawing state: committed paths plus the stroke being recorded.

use crate::error::{DrawError, DrawResult};
use crate::history::Snapshot;
use crate::path::Path;
use crate::path_list::PathList;
use crate::recorder::{self, Committed};
use crate::tools::ToolSettings;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// What happened to the active path on commit.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// The path was appended to the committed sequence.
    Kept,
    /// The path had too few points and was dropped.
    Discarded(Path),
}

/// The paths of one drawing session.
///
/// `active` is only set between pointer-down and pointer-up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredDrawing")]
pub struct DrawingState {
    committed: PathList,
    #[serde(default)]
    active: Option<Path>,
}

/// Wire form of [`DrawingState`], checked before it becomes one.
#[derive(Deserialize)]
struct StoredDrawing {
    committed: PathList,
    #[serde(default)]
    active: Option<Path>,
}

impl TryFrom<StoredDrawing> for DrawingState {
    type Error = DrawError;

    fn try_from(stored: StoredDrawing) -> DrawResult<Self> {
        for path in stored.committed.iter() {
            path.validate()?;
            if !path.is_visible() {
                return Err(DrawError::InvalidStrokeConfig(format!(
                    "committed path {} has {} point(s)",
                    path.id(),
                    path.len()
                )));
            }
        }
        if let Some(active) = &stored.active {
            active.validate()?;
            if active.is_empty() {
                return Err(DrawError::InvalidStrokeConfig(format!(
                    "active path {} has no points",
                    active.id()
                )));
            }
        }

        Ok(Self {
            committed: stored.committed,
            active: stored.active,
        })
    }
}

impl DrawingState {
    /// Create an empty drawing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn committed(&self) -> &PathList {
        &self.committed
    }

    pub fn active(&self) -> Option<&Path> {
        self.active.as_ref()
    }

    /// Whether a stroke is being recorded.
    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    /// Open a new active path. Any previous active path is replaced.
    pub fn begin(&mut self, point: Point, settings: &ToolSettings) -> DrawResult<()> {
        self.active = Some(recorder::begin_with(point, settings)?);
        Ok(())
    }

    /// Append a point to the active path. Returns `false` when idle.
    pub fn extend(&mut self, point: Point) -> DrawResult<bool> {
        match self.active.as_mut() {
            Some(active) => {
                recorder::extend(active, point)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Commit the active path. Returns `None` when idle.
    pub fn commit(&mut self) -> Option<CommitOutcome> {
        let active = self.active.take()?;
        let Committed { paths, discarded } = recorder::commit(active, &self.committed);
        self.committed = paths;
        Some(match discarded {
            Some(path) => CommitOutcome::Discarded(path),
            None => CommitOutcome::Kept,
        })
    }

    /// Drop the active path without committing it.
    pub fn abandon(&mut self) -> Option<Path> {
        self.active.take()
    }

    /// Remove every path.
    pub fn clear(&mut self) {
        self.committed = PathList::new();
        self.active = None;
    }

    /// Capture the committed paths for the history.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.committed.clone())
    }

    /// Replace the committed paths with a snapshot's.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.committed = snapshot.paths().clone();
        self.active = None;
    }

    /// Paths in paint order: committed first, then the active path.
    pub fn paint_order(&self) -> impl Iterator<Item = &Path> + '_ {
        self.committed.iter().chain(self.active.iter())
    }

    /// Serialize the drawing to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a drawing from JSON.
    ///
    /// Rejects paths that recording could never have produced: non-positive
    /// widths, non-finite points, and committed paths under two points.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
