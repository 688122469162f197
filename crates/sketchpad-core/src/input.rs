//! Pointer input consumed by a drawing session.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event in surface-local pixel coordinates.
///
/// The host UI owns hit-testing and scaling; positions arrive already
/// transformed into surface space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up,
    /// Pointer left the surface; ends a stroke like `Up`.
    Leave,
}

impl PointerEvent {
    pub fn down(x: f64, y: f64) -> Self {
        PointerEvent::Down {
            position: Point::new(x, y),
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }

    /// Position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position } | PointerEvent::Move { position } => Some(*position),
            PointerEvent::Up | PointerEvent::Leave => None,
        }
    }

    /// Whether the event ends the current stroke.
    pub fn ends_stroke(&self) -> bool {
        matches!(self, PointerEvent::Up | PointerEvent::Leave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions() {
        assert_eq!(PointerEvent::down(1.0, 2.0).position(), Some(Point::new(1.0, 2.0)));
        assert_eq!(PointerEvent::Leave.position(), None);
        assert!(PointerEvent::Leave.ends_stroke());
        assert!(!PointerEvent::moved(0.0, 0.0).ends_stroke());
    }

    #[test]
    fn test_json_tagging() {
        let event: PointerEvent = serde_json::from_str(r#"{"type":"leave"}"#).unwrap();
        assert_eq!(event, PointerEvent::Leave);
        let json = serde_json::to_string(&PointerEvent::Up).unwrap();
        assert_eq!(json, r#"{"type":"up"}"#);
    }
}
