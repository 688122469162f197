//! Linear undo/redo history of drawing snapshots.

use crate::path::Path;
use crate::path_list::PathList;
use serde::{Deserialize, Serialize};

/// An immutable record of the committed paths at one point in time.
///
/// Cloning a snapshot is O(1); all snapshots share path storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    paths: PathList,
}

impl Snapshot {
    pub fn new(paths: PathList) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &PathList {
        &self.paths
    }

    /// Number of committed paths in the snapshot.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Path> + '_ {
        self.paths.iter()
    }
}

/// Snapshot sequence with a cursor at the state currently shown.
///
/// Pushing after an undo discards every snapshot past the cursor.
#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: Vec<Snapshot>,
    cursor: Option<usize>,
    limit: Option<usize>,
}

impl History {
    /// Create an empty, unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that keeps at most `limit` snapshots (minimum 1).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit.max(1)),
            ..Self::default()
        }
    }

    /// Record `snapshot` as the newest state.
    pub fn push(&mut self, snapshot: Snapshot) {
        if let Some(cursor) = self.cursor {
            let dropped = self.snapshots.len() - (cursor + 1);
            if dropped > 0 {
                log::debug!("History: discarding {} redo snapshot(s)", dropped);
            }
            self.snapshots.truncate(cursor + 1);
        }

        self.snapshots.push(snapshot);

        if let Some(limit) = self.limit {
            if self.snapshots.len() > limit {
                let excess = self.snapshots.len() - limit;
                self.snapshots.drain(..excess);
            }
        }

        self.cursor = Some(self.snapshots.len() - 1);
    }

    /// Step back one snapshot. Returns `None` at the start of history.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        match self.cursor {
            Some(cursor) if cursor > 0 => {
                self.cursor = Some(cursor - 1);
                self.snapshots.get(cursor - 1)
            }
            _ => None,
        }
    }

    /// Step forward one snapshot. Returns `None` at the end of history.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        match self.cursor {
            Some(cursor) if cursor + 1 < self.snapshots.len() => {
                self.cursor = Some(cursor + 1);
                self.snapshots.get(cursor + 1)
            }
            _ => None,
        }
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor + 1 < self.snapshots.len())
    }

    /// The snapshot under the cursor.
    pub fn current(&self) -> Option<&Snapshot> {
        self.cursor.and_then(|cursor| self.snapshots.get(cursor))
    }

    /// Cursor index, `None` before the first push.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Forget every snapshot (session reset).
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::StrokeColor;
    use crate::recorder;
    use crate::tools::ToolKind;
    use kurbo::Point;

    fn snapshot_with(count: usize) -> Snapshot {
        let paths = (0..count)
            .map(|i| {
                let mut path =
                    recorder::begin(Point::new(i as f64, 0.0), ToolKind::Pen, StrokeColor::BLACK, 1.0)
                        .unwrap();
                recorder::extend(&mut path, Point::new(i as f64, 10.0)).unwrap();
                path
            })
            .collect();
        Snapshot::new(paths)
    }

    #[test]
    fn test_empty_history() {
        let mut history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.cursor(), None);
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_first_push_cannot_be_undone() {
        let mut history = History::new();
        history.push(snapshot_with(1));
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), Some(0));
        assert!(history.undo().is_none());
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn test_undo_redo() {
        let mut history = History::new();
        history.push(snapshot_with(1));
        history.push(snapshot_with(2));

        assert_eq!(history.undo().map(Snapshot::len), Some(1));
        assert!(history.can_redo());
        assert_eq!(history.redo().map(Snapshot::len), Some(2));
        assert!(history.redo().is_none());
        assert_eq!(history.cursor(), Some(1));
    }

    #[test]
    fn test_push_after_undo_truncates_redo() {
        let mut history = History::new();
        history.push(snapshot_with(1));
        history.push(snapshot_with(2));
        history.push(snapshot_with(3));

        history.undo();
        history.undo();
        history.push(snapshot_with(5));

        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
        assert!(history.redo().is_none());
        assert_eq!(history.current().map(Snapshot::len), Some(5));
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::with_limit(2);
        history.push(snapshot_with(1));
        history.push(snapshot_with(2));
        history.push(snapshot_with(3));

        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), Some(1));
        assert_eq!(history.undo().map(Snapshot::len), Some(2));
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_clear() {
        let mut history = History::new();
        history.push(snapshot_with(1));
        history.clear();
        assert!(history.is_empty());
        assert!(history.current().is_none());
    }
}
