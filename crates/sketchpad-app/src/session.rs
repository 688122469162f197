//! Drawing session: the pointer-driven state machine around one surface.
//!
//! ```text
//! Idle --pointer-down--> Recording --pointer-move*--> Recording --pointer-up/leave--> Idle
//! ```
//!
//! Undo, redo, clear and export are only accepted while idle. Every mutation
//! repaints the surface before returning, so the surface always reflects the
//! drawing state.

use crate::config::AppConfig;
use crate::error::{SessionError, SessionResult};
use kurbo::Point;
use sketchpad_core::{
    CommitOutcome, DrawingState, History, PointerEvent, StrokeColor, ToolKind, ToolSettings,
};
use sketchpad_render::{RasterRenderer, Renderer, Surface, export_data_url, export_png};

/// Where the session is in the stroke state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Idle,
    Recording,
}

/// Outcome of an undo or redo request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryStep {
    /// The cursor moved; the drawing now holds this many paths.
    Applied { paths: usize },
    /// Undo at the start of history. Nothing changed.
    Underflow,
    /// Redo at the end of history. Nothing changed.
    Overflow,
}

impl HistoryStep {
    pub fn is_applied(self) -> bool {
        matches!(self, HistoryStep::Applied { .. })
    }
}

/// One open drawing surface with its paths, history and tool settings.
pub struct DrawingSession<R: Renderer = RasterRenderer> {
    settings: ToolSettings,
    palette: Vec<StrokeColor>,
    state: DrawingState,
    history: History,
    surface: Surface,
    renderer: R,
}

impl DrawingSession<RasterRenderer> {
    /// Open a session with the CPU raster renderer.
    pub fn new(config: &AppConfig) -> SessionResult<Self> {
        let renderer = RasterRenderer::new().with_anti_alias(config.anti_alias);
        Self::with_renderer(config, renderer)
    }
}

impl<R: Renderer> DrawingSession<R> {
    /// Open a session drawing through `renderer`.
    ///
    /// Fails when the surface cannot be allocated or the initial tool
    /// settings are invalid.
    pub fn with_renderer(config: &AppConfig, renderer: R) -> SessionResult<Self> {
        config.tool.validate()?;
        let surface = Surface::new(config.width, config.height, config.background.into())?;
        let history = match config.history_limit {
            Some(limit) => History::with_limit(limit),
            None => History::new(),
        };

        let mut session = Self {
            settings: config.tool,
            palette: config.palette.clone(),
            state: DrawingState::new(),
            history,
            surface,
            renderer,
        };
        session.repaint()?;
        log::info!(
            "Opened {}x{} drawing session",
            config.width,
            config.height
        );
        Ok(session)
    }

    pub fn mode(&self) -> SessionMode {
        if self.state.is_recording() {
            SessionMode::Recording
        } else {
            SessionMode::Idle
        }
    }

    pub fn is_recording(&self) -> bool {
        self.state.is_recording()
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn palette(&self) -> &[StrokeColor] {
        &self.palette
    }

    /// Replace the settings used by the next stroke.
    pub fn set_settings(&mut self, settings: ToolSettings) -> SessionResult<()> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.settings.tool = tool;
    }

    pub fn set_color(&mut self, color: StrokeColor) {
        self.settings.color = color;
    }

    /// Set the stroke width for the next stroke. Rejects non-positive widths.
    pub fn set_width(&mut self, width: f64) -> SessionResult<()> {
        self.set_settings(self.settings.with_width(width))
    }

    /// Use the palette swatch at `index` as the pen color.
    pub fn select_palette_color(&mut self, index: usize) -> SessionResult<StrokeColor> {
        let color = *self
            .palette
            .get(index)
            .ok_or(SessionError::NoSuchSwatch(index))?;
        self.settings.color = color;
        Ok(color)
    }

    /// Dispatch a pointer event.
    pub fn handle(&mut self, event: PointerEvent) -> SessionResult<()> {
        match event {
            PointerEvent::Down { position } => self.pointer_down(position),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up => self.pointer_up().map(|_| ()),
            PointerEvent::Leave => self.pointer_leave().map(|_| ()),
        }
    }

    /// Start a stroke at `point` with the current settings.
    ///
    /// A stroke still recording (its pointer-up was lost) is committed first.
    pub fn pointer_down(&mut self, point: Point) -> SessionResult<()> {
        if self.state.is_recording() {
            log::warn!("Pointer down while recording; committing the open stroke");
            self.pointer_up()?;
        }

        self.state.begin(point, &self.settings)?;
        self.repaint()
    }

    /// Extend the current stroke. Ignored while idle.
    pub fn pointer_move(&mut self, point: Point) -> SessionResult<()> {
        if self.state.extend(point)? {
            self.repaint()?;
        }
        Ok(())
    }

    /// Finish the current stroke. Returns `None` while idle.
    pub fn pointer_up(&mut self) -> SessionResult<Option<CommitOutcome>> {
        let Some(outcome) = self.state.commit() else {
            return Ok(None);
        };
        if outcome == CommitOutcome::Kept {
            self.history.push(self.state.snapshot());
        }
        self.repaint()?;
        Ok(Some(outcome))
    }

    /// Pointer left the surface; same as [`Self::pointer_up`].
    pub fn pointer_leave(&mut self) -> SessionResult<Option<CommitOutcome>> {
        self.pointer_up()
    }

    fn ensure_idle(&self) -> SessionResult<()> {
        if self.state.is_recording() {
            Err(SessionError::SessionBusy)
        } else {
            Ok(())
        }
    }

    /// Step back one snapshot.
    pub fn undo(&mut self) -> SessionResult<HistoryStep> {
        self.ensure_idle()?;
        let Some(snapshot) = self.history.undo() else {
            log::debug!("Undo at start of history");
            return Ok(HistoryStep::Underflow);
        };
        self.state.restore(snapshot);
        self.repaint()?;
        Ok(HistoryStep::Applied {
            paths: self.state.committed().len(),
        })
    }

    /// Step forward one snapshot.
    pub fn redo(&mut self) -> SessionResult<HistoryStep> {
        self.ensure_idle()?;
        let Some(snapshot) = self.history.redo() else {
            log::debug!("Redo at end of history");
            return Ok(HistoryStep::Overflow);
        };
        self.state.restore(snapshot);
        self.repaint()?;
        Ok(HistoryStep::Applied {
            paths: self.state.committed().len(),
        })
    }

    /// Remove every path. Recorded in history, so it can be undone.
    pub fn clear(&mut self) -> SessionResult<()> {
        self.ensure_idle()?;
        self.state.clear();
        self.history.push(self.state.snapshot());
        log::info!("Drawing cleared");
        self.repaint()
    }

    /// Discard the drawing and its history, abandoning any open stroke.
    pub fn reset(&mut self) -> SessionResult<()> {
        if let Some(path) = self.state.abandon() {
            log::debug!("Abandoned stroke {} on reset", path.id());
        }
        self.state.clear();
        self.history.clear();
        log::info!("Drawing session reset");
        self.repaint()
    }

    /// Encode the surface as PNG.
    pub fn export_png(&self) -> SessionResult<Vec<u8>> {
        self.ensure_idle()?;
        let data = export_png(&self.surface)?;
        log::info!("Exported drawing ({} bytes)", data.len());
        Ok(data)
    }

    /// Encode the surface as a PNG data URL for embedding in a document.
    pub fn export_data_url(&self) -> SessionResult<String> {
        self.ensure_idle()?;
        Ok(export_data_url(&self.surface)?)
    }

    fn repaint(&mut self) -> SessionResult<()> {
        self.renderer.render(&mut self.surface, &self.state)?;
        Ok(())
    }
}
