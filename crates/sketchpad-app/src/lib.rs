//! Sketchpad Application
//!
//! The drawing session state machine that ties stroke recording, history,
//! rendering and export together, plus configuration and script replay for
//! the command line shell.

mod config;
mod error;
mod script;
mod session;

pub use config::{AppConfig, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use error::{AppError, AppResult, SessionError, SessionResult};
pub use script::{Action, ReplayReport, Script};
pub use session::{DrawingSession, HistoryStep, SessionMode};
