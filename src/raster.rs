//! Vector-to-raster conversion.

mod payload;
mod surface;

use std::sync::Arc;

use anyhow::Context as _;

pub use payload::{SVG_DATA_URI_PREFIX, SvgPayload};
pub use surface::{NoSurfaces, SoftwareSurfaces, Surface, SurfaceProvider};

use crate::foundation::core::{Canvas, RASTER_SIZE};
use crate::foundation::error::SockyResult;
use crate::vector::VectorImage;

pub const PNG_MIME: &str = "image/png";
pub const PNG_EXTENSION: &str = "png";

/// PNG-encoded pixel buffer produced for one export request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterBuffer {
    canvas: Canvas,
    png: Vec<u8>,
}

impl RasterBuffer {
    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    pub fn mime(&self) -> &'static str {
        PNG_MIME
    }

    pub fn extension(&self) -> &'static str {
        PNG_EXTENSION
    }

    /// Decode back to straight-alpha RGBA8 pixels.
    pub fn decode_rgba8(&self) -> SockyResult<image::RgbaImage> {
        let img = image::load_from_memory_with_format(&self.png, image::ImageFormat::Png)
            .context("decode raster png")?;
        Ok(img.to_rgba8())
    }
}

/// Turns [`VectorImage`]s into [`RasterBuffer`]s using surfaces from a [`SurfaceProvider`].
#[derive(Clone)]
pub struct Rasterizer {
    surfaces: Arc<dyn SurfaceProvider>,
}

impl Rasterizer {
    pub fn new(surfaces: Arc<dyn SurfaceProvider>) -> Self {
        Self { surfaces }
    }

    /// CPU rasterizer; available on every host.
    pub fn software() -> Self {
        Self::new(Arc::new(SoftwareSurfaces))
    }

    /// Rasterize `image` into a `width x height` PNG.
    ///
    /// The output size is independent of the image's display size. Fails with
    /// `RenderSurface` when no surface can be acquired and with `Decode` when the
    /// serialized payload does not parse. The surface never outlives this call.
    #[tracing::instrument(skip(self, image))]
    pub async fn rasterize(
        &self,
        image: &VectorImage,
        width: u32,
        height: u32,
    ) -> SockyResult<RasterBuffer> {
        let canvas = Canvas::new(width, height)?;
        let payload = SvgPayload::encode(&image.to_svg());
        self.rasterize_payload(&payload, canvas).await
    }

    /// Rasterize at the fixed export geometry.
    pub async fn rasterize_export(&self, image: &VectorImage) -> SockyResult<RasterBuffer> {
        self.rasterize(image, RASTER_SIZE, RASTER_SIZE).await
    }

    pub async fn rasterize_payload(
        &self,
        payload: &SvgPayload,
        canvas: Canvas,
    ) -> SockyResult<RasterBuffer> {
        let mut surface = self.surfaces.acquire(canvas)?;
        let tree = payload.decode()?;
        surface.draw(&tree);
        let png = surface.encode_png()?;
        tracing::debug!(
            width = canvas.width,
            height = canvas.height,
            bytes = png.len(),
            "rasterized"
        );
        Ok(RasterBuffer { canvas, png })
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::software()
    }
}

impl std::fmt::Debug for Rasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rasterizer").finish_non_exhaustive()
    }
}
