use crate::foundation::error::{SockyError, SockyResult};

pub use kurbo::{BezPath, Circle, Rect};

/// Side length of the logical canvas and of every exported raster.
pub const RASTER_SIZE: u32 = 400;

/// On-screen size used when the caller does not pick one.
pub const DEFAULT_DISPLAY_SIZE: u32 = 300;

/// Pixel dimensions of a canvas or raster target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> SockyResult<Self> {
        if width == 0 || height == 0 {
            return Err(SockyError::validation(format!(
                "canvas dimensions must be positive, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// The fixed 400x400 export geometry.
    pub const fn export() -> Self {
        Self {
            width: RASTER_SIZE,
            height: RASTER_SIZE,
        }
    }

    pub const fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    /// Number of RGBA8 bytes needed to hold one frame of this canvas.
    pub fn rgba8_len(self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_rejects_zero_dimensions() {
        assert!(Canvas::new(0, 10).is_err());
        assert!(Canvas::new(10, 0).is_err());
        assert_eq!(Canvas::new(3, 4).unwrap().rgba8_len(), 48);
    }

    #[test]
    fn export_canvas_is_fixed() {
        assert_eq!(Canvas::export(), Canvas::square(400));
    }
}
