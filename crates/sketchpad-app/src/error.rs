//! Error types for sessions and the application shell.

use sketchpad_core::DrawError;
use sketchpad_render::{ExportError, RendererError};
use thiserror::Error;

/// Errors surfaced by a drawing session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session busy: a stroke is being recorded")]
    SessionBusy,
    #[error("No palette swatch at index {0}")]
    NoSuchSwatch(usize),
    #[error(transparent)]
    Draw(#[from] DrawError),
    #[error(transparent)]
    Render(#[from] RendererError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors raised by the application shell.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;
