//! Sketchpad Core Library
//!
//! Platform-agnostic stroke model, stroke recorder, drawing state and
//! undo/redo history for the Sketchpad freehand drawing engine.

pub mod drawing;
pub mod error;
pub mod history;
pub mod input;
pub mod path;
pub mod path_list;
pub mod recorder;
pub mod tools;

pub use drawing::{CommitOutcome, DrawingState};
pub use error::{DrawError, DrawResult};
pub use history::{History, Snapshot};
pub use input::PointerEvent;
pub use path::{Path, PathId, StrokeColor};
pub use path_list::PathList;
pub use recorder::{Committed, MIN_VISIBLE_POINTS};
pub use tools::{PALETTE, ToolKind, ToolSettings};
