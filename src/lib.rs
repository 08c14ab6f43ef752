//! Sockybara renders a character from nine color traits and exports it as a PNG.
//!
//! - [`glyph::render`] turns [`ColorTraits`] into a [`VectorImage`]
//! - [`Rasterizer`] converts the image into a fixed 400x400 [`RasterBuffer`]
//! - [`ExportCoordinator`] delivers the buffer via native share, clipboard or file save
#![forbid(unsafe_code)]

mod foundation;

pub mod export;
pub mod glyph;
pub mod raster;
pub mod settings;
pub mod source;
pub mod traits;
pub mod vector;

pub use crate::foundation::core::{Canvas, DEFAULT_DISPLAY_SIZE, RASTER_SIZE};
pub use crate::foundation::error::{SockyError, SockyResult};

pub use crate::export::{
    Delivery, ExportArtifact, ExportCoordinator, ExportHost, ExportStatus, HostCapabilities,
    StatusBoard,
};
pub use crate::glyph::{render, render_at};
pub use crate::raster::{RasterBuffer, Rasterizer};
pub use crate::settings::ExportSettings;
pub use crate::source::{JsonTraitSource, TokenId, TraitRecord, TraitSource};
pub use crate::traits::{ColorTraits, DefaultTable, PartialTraits, TraitSlot};
pub use crate::vector::VectorImage;
