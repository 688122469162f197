//! Sketchpad Render Library
//!
//! Raster surface, renderer abstraction and image export for Sketchpad.
//! The default renderer rasterizes on the CPU with tiny-skia.

mod export;
mod raster_impl;
mod renderer;
mod surface;

pub use export::{DATA_URL_PREFIX, ExportError, ExportResult, export_data_url, export_png};
pub use raster_impl::RasterRenderer;
pub use renderer::{RenderResult, Renderer, RendererError};
pub use surface::Surface;
