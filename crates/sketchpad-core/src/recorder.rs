//! Stroke recorder: turns a pointer gesture into a committed path.
//!
//! These are pure transformations over paths and path lists; the drawing
//! state and session decide when to call them.

use crate::error::{DrawError, DrawResult};
use crate::path::{Path, StrokeColor};
use crate::path_list::PathList;
use crate::tools::{ToolKind, ToolSettings, validate_width};
use kurbo::Point;

/// Paths with fewer points leave no mark and are dropped on commit.
pub const MIN_VISIBLE_POINTS: usize = 2;

/// Result of committing an active path.
#[derive(Debug, Clone, PartialEq)]
pub struct Committed {
    /// The committed sequence after the commit.
    pub paths: PathList,
    /// The active path, if it was too short to keep.
    pub discarded: Option<Path>,
}

fn check_point(point: Point) -> DrawResult<Point> {
    if point.is_finite() {
        Ok(point)
    } else {
        Err(DrawError::NonFinitePoint {
            x: point.x,
            y: point.y,
        })
    }
}

/// Open a new path seeded with `point`.
pub fn begin(point: Point, tool: ToolKind, color: StrokeColor, width: f64) -> DrawResult<Path> {
    validate_width(width)?;
    let point = check_point(point)?;

    let mut path = Path::new(tool, color, width);
    path.push(point);
    log::debug!("Stroke {} opened with {} at {:?}", path.id, tool, point);
    Ok(path)
}

/// Open a new path using the current tool settings.
pub fn begin_with(point: Point, settings: &ToolSettings) -> DrawResult<Path> {
    begin(point, settings.tool, settings.color, settings.width)
}

/// Append `point` to the open path. Coordinates outside the surface are kept.
pub fn extend(active: &mut Path, point: Point) -> DrawResult<()> {
    active.push(check_point(point)?);
    Ok(())
}

/// Append `active` to `committed`, dropping it if it is too short to render.
pub fn commit(active: Path, committed: &PathList) -> Committed {
    if active.len() < MIN_VISIBLE_POINTS {
        log::debug!(
            "Stroke {} discarded with {} point(s)",
            active.id,
            active.len()
        );
        return Committed {
            paths: committed.clone(),
            discarded: Some(active),
        };
    }

    log::debug!("Stroke {} committed with {} points", active.id, active.len());
    Committed {
        paths: committed.push(active),
        discarded: None,
    }
}
