//! Fixed-size raster surface.

use crate::renderer::{RenderResult, RendererError};
use peniko::Color;
use tiny_skia::Pixmap;

/// An RGBA pixel buffer with an opaque background color.
///
/// The surface is a derived artifact: a render pass always rebuilds it in
/// full from a drawing state.
#[derive(Debug, Clone)]
pub struct Surface {
    pixmap: Pixmap,
    background: Color,
}

pub(crate) fn to_skia_color(color: Color) -> tiny_skia::Color {
    let rgba = color.to_rgba8();
    tiny_skia::Color::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a)
}

impl Surface {
    /// Allocate a surface filled with `background`.
    ///
    /// Fails when the size is zero or too large to allocate.
    pub fn new(width: u32, height: u32, background: Color) -> RenderResult<Self> {
        let pixmap = Pixmap::new(width, height)
            .ok_or(RendererError::RenderTargetUnavailable { width, height })?;
        let mut surface = Self { pixmap, background };
        surface.clear();
        log::debug!("Allocated {}x{} surface", width, height);
        Ok(surface)
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Overwrite every pixel with the background color.
    pub fn clear(&mut self) {
        self.pixmap.fill(to_skia_color(self.background));
    }

    /// Raw premultiplied RGBA bytes.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Straight-alpha RGBA of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let pixel = self.pixmap.pixel(x, y)?.demultiply();
        Some([pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()])
    }

    /// Straight-alpha RGBA bytes, row-major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|pixel| {
                let pixel = pixel.demultiply();
                [pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()]
            })
            .collect()
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }
}
