//! Renderer trait abstraction.

use crate::surface::Surface;
use sketchpad_core::DrawingState;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RendererError {
    #[error("Render target unavailable: cannot allocate a {width}x{height} surface")]
    RenderTargetUnavailable { width: u32, height: u32 },
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Trait for rendering backends.
///
/// A render pass repaints the whole surface from the drawing state. It must
/// be deterministic: the same state always yields the same pixels.
pub trait Renderer: Send + Sync {
    /// Clear `surface` to its background and replay every path of `state`,
    /// committed paths first and the active path last.
    fn render(&mut self, surface: &mut Surface, state: &DrawingState) -> RenderResult<()>;
}
