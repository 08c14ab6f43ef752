use std::io::Cursor;

use anyhow::Context as _;
use resvg::tiny_skia;

use crate::foundation::core::Canvas;
use crate::foundation::error::{SockyError, SockyResult};

/// Offscreen 2D drawing surface owned by a single rasterize call.
///
/// Dropping the surface releases its pixel storage.
pub struct Surface {
    canvas: Canvas,
    pixmap: tiny_skia::Pixmap,
}

impl Surface {
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Draw `tree` scaled to fill the whole surface.
    pub fn draw(&mut self, tree: &usvg::Tree) {
        let sx = (self.canvas.width as f32) / tree.size().width();
        let sy = (self.canvas.height as f32) / tree.size().height();
        let xform = tiny_skia::Transform::from_scale(sx, sy);

        resvg::render(tree, xform, &mut self.pixmap.as_mut());
    }

    /// Straight-alpha RGBA8, row-major, tightly packed.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.canvas.rgba8_len());
        for px in self.pixmap.pixels() {
            let c = px.demultiply();
            out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        out
    }

    pub fn encode_png(&self) -> SockyResult<Vec<u8>> {
        let img = image::RgbaImage::from_raw(self.canvas.width, self.canvas.height, self.to_rgba8())
            .ok_or_else(|| SockyError::render_surface("surface byte length mismatch"))?;

        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode png")?;
        Ok(buf)
    }
}

/// Source of offscreen surfaces. Hosts without 2D drawing support return
/// [`SockyError::RenderSurface`].
pub trait SurfaceProvider: Send + Sync {
    fn acquire(&self, canvas: Canvas) -> SockyResult<Surface>;
}

/// CPU surfaces backed by `tiny-skia` pixmaps.
#[derive(Clone, Copy, Debug, Default)]
pub struct SoftwareSurfaces;

impl SurfaceProvider for SoftwareSurfaces {
    fn acquire(&self, canvas: Canvas) -> SockyResult<Surface> {
        let pixmap = tiny_skia::Pixmap::new(canvas.width, canvas.height).ok_or_else(|| {
            SockyError::render_surface(format!(
                "failed to allocate {}x{} pixmap",
                canvas.width, canvas.height
            ))
        })?;
        Ok(Surface { canvas, pixmap })
    }
}

/// Provider for hosts with no 2D drawing capability at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSurfaces;

impl SurfaceProvider for NoSurfaces {
    fn acquire(&self, _canvas: Canvas) -> SockyResult<Surface> {
        Err(SockyError::render_surface(
            "host does not provide a 2d drawing surface",
        ))
    }
}
