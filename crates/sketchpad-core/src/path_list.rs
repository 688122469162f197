//! Persistent, structurally shared sequence of committed paths.
//!
//! Appending returns a new list that shares every existing node with the
//! old one, so history snapshots are O(1) handles instead of deep copies.

use crate::path::Path;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

struct Node {
    path: Arc<Path>,
    prev: Option<Arc<Node>>,
}

/// An immutable list of committed paths in insertion order.
#[derive(Clone, Default)]
pub struct PathList {
    head: Option<Arc<Node>>,
    len: usize,
}

impl PathList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return a new list with `path` appended. `self` is left untouched.
    pub fn push(&self, path: impl Into<Arc<Path>>) -> Self {
        Self {
            head: Some(Arc::new(Node {
                path: path.into(),
                prev: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// The most recently committed path.
    pub fn last(&self) -> Option<&Path> {
        self.head.as_deref().map(|node| node.path.as_ref())
    }

    /// Iterate from the oldest path to the newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Path> + '_ {
        let mut nodes = Vec::with_capacity(self.len);
        let mut cursor = self.head.as_deref();
        while let Some(node) = cursor {
            nodes.push(node.path.as_ref());
            cursor = node.prev.as_deref();
        }
        nodes.into_iter().rev()
    }

    /// Whether both lists are handles to the same nodes.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.head, &other.head) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

// Unlink uniquely owned nodes one at a time so long lists don't recurse.
impl Drop for PathList {
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(node) = next {
            match Arc::try_unwrap(node) {
                Ok(mut node) => next = node.prev.take(),
                Err(_) => break,
            }
        }
    }
}

impl PartialEq for PathList {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && (self.ptr_eq(other) || self.iter().eq(other.iter()))
    }
}

impl fmt::Debug for PathList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl FromIterator<Path> for PathList {
    fn from_iter<I: IntoIterator<Item = Path>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |list, path| list.push(path))
    }
}

impl Serialize for PathList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for PathList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let paths = Vec::<Path>::deserialize(deserializer)?;
        Ok(paths.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::StrokeColor;
    use crate::tools::ToolKind;

    fn path(width: f64) -> Path {
        Path::new(ToolKind::Pen, StrokeColor::BLACK, width)
    }

    #[test]
    fn test_push_leaves_source_untouched() {
        let empty = PathList::new();
        let one = empty.push(path(1.0));
        let two = one.push(path(2.0));

        assert!(empty.is_empty());
        assert_eq!(one.len(), 1);
        assert_eq!(two.len(), 2);
        assert_eq!(one.last().map(Path::width), Some(1.0));
        assert_eq!(two.last().map(Path::width), Some(2.0));
    }

    #[test]
    fn test_iter_in_insertion_order() {
        let list: PathList = (1..=4).map(|w| path(w as f64)).collect();
        let widths: Vec<f64> = list.iter().map(Path::width).collect();
        assert_eq!(widths, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_branches_share_prefix() {
        let base = PathList::new().push(path(1.0));
        let left = base.push(path(2.0));
        let right = base.push(path(3.0));

        assert_ne!(left, right);
        assert!(std::ptr::eq(
            left.iter().next().unwrap(),
            right.iter().next().unwrap()
        ));
    }

    #[test]
    fn test_equality() {
        let a = PathList::new().push(path(1.0));
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert_eq!(a, b);
        assert_eq!(PathList::new(), PathList::new());
    }

    #[test]
    fn test_serde_as_sequence() {
        let list: PathList = [path(1.0), path(5.0)].into_iter().collect();
        let json = serde_json::to_string(&list).unwrap();
        let back: PathList = serde_json::from_str(&json).unwrap();
        assert_eq!(list, back);
    }

    #[test]
    fn test_long_list_drops() {
        let mut list = PathList::new();
        for _ in 0..200_000 {
            list = list.push(path(1.0));
        }
        assert_eq!(list.len(), 200_000);
        drop(list);
    }
}
