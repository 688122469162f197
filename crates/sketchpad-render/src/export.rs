//! Image export of a rendered surface.
//!
//! Export reads the surface, not the drawing state: callers must render
//! after the last mutation or the output is stale.

use crate::surface::Surface;
use base64::{Engine, engine::general_purpose::STANDARD};
use thiserror::Error;

/// Prefix of the data URL handed to the document editor.
pub const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PNG encoding failed: {0}")]
    EncodingFailure(#[from] png::EncodingError),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Encode the surface as an 8-bit RGBA PNG.
pub fn export_png(surface: &Surface) -> ExportResult<Vec<u8>> {
    let (width, height) = (surface.width(), surface.height());
    let rgba = surface.to_rgba8();

    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&rgba)?;
        writer.finish()?;
    }

    log::debug!("Encoded {}x{} PNG ({} bytes)", width, height, png_data.len());
    Ok(png_data)
}

/// Encode the surface as a `data:image/png;base64,…` URL.
pub fn export_data_url(surface: &Surface) -> ExportResult<String> {
    let png_data = export_png(surface)?;
    Ok(format!("{}{}", DATA_URL_PREFIX, STANDARD.encode(png_data)))
}
