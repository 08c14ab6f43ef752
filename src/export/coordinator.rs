use std::path::PathBuf;

use crate::export::host::{ExportHost, ShareRequest};
use crate::export::status::StatusBoard;
use crate::foundation::error::{SockyError, SockyResult};
use crate::raster::{RasterBuffer, Rasterizer};
use crate::settings::ExportSettings;
use crate::vector::VectorImage;

/// Channel that ended up delivering an export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delivery {
    Share,
    Clipboard,
    Download { path: PathBuf },
}

impl Delivery {
    pub fn as_str(&self) -> &'static str {
        match self {
            Delivery::Share => "delivered-via-share",
            Delivery::Clipboard => "delivered-via-clipboard",
            Delivery::Download { .. } => "delivered-via-download",
        }
    }
}

/// Result of a successful export. Failures are reported as `Err(SockyError)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub raster: RasterBuffer,
    pub delivery: Delivery,
}

/// Delivers rasterized images through native share, clipboard or file save.
///
/// Share: native share, falling back to clipboard.
/// Download: native share, falling back to file save.
///
/// Every failed action clears the "copied" indicator. Clipboard writes and file saves
/// are never retried. Re-entrancy is not guarded;
/// callers should keep their trigger disabled while [`StatusBoard`] reports busy.
#[derive(Debug)]
pub struct ExportCoordinator {
    rasterizer: Rasterizer,
    host: ExportHost,
    settings: ExportSettings,
    status: StatusBoard,
}

impl ExportCoordinator {
    pub fn new(rasterizer: Rasterizer, host: ExportHost, settings: ExportSettings) -> Self {
        Self {
            rasterizer,
            host,
            settings,
            status: StatusBoard::new(),
        }
    }

    pub fn status(&self) -> &StatusBoard {
        &self.status
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Share the image, or copy it to the clipboard when sharing is unavailable,
    /// fails or is cancelled.
    #[tracing::instrument(skip(self, image))]
    pub async fn share(&self, image: &VectorImage, id: &str) -> SockyResult<ExportArtifact> {
        let _running = self.status.begin();
        let (raster, file_name) = self.prepare(image, id).await?;

        if self.host.capabilities.native_share {
            match self.native_share(&raster, &file_name, id).await {
                Ok(()) => return Ok(artifact(file_name, raster, Delivery::Share)),
                Err(e) => {
                    tracing::info!(error = %e, "native share did not complete, copying instead");
                }
            }
        } else {
            tracing::debug!("native share unavailable, copying to clipboard");
        }

        match self.host.clipboard.write_image(&raster).await {
            Ok(()) => {
                self.status.mark_copied(self.settings.copied_window());
                tracing::info!(%file_name, "copied to clipboard");
                Ok(artifact(file_name, raster, Delivery::Clipboard))
            }
            Err(e) => {
                self.status.clear_copied();
                tracing::error!(error = %e, "clipboard write failed");
                Err(as_clipboard_error(e))
            }
        }
    }

    /// Share the image, or save it to a file when sharing is unavailable, fails or
    /// is cancelled. Never touches the clipboard.
    #[tracing::instrument(skip(self, image))]
    pub async fn download(&self, image: &VectorImage, id: &str) -> SockyResult<ExportArtifact> {
        let _running = self.status.begin();
        let (raster, file_name) = self.prepare(image, id).await?;

        if self.host.capabilities.native_share {
            match self.native_share(&raster, &file_name, id).await {
                Ok(()) => return Ok(artifact(file_name, raster, Delivery::Share)),
                Err(e) => {
                    tracing::info!(error = %e, "native share did not complete, saving instead");
                }
            }
        } else {
            tracing::debug!("native share unavailable, saving file");
        }

        match self.host.saver.save(&file_name, &raster).await {
            Ok(path) => {
                tracing::info!(path = %path.display(), "saved");
                Ok(artifact(file_name, raster, Delivery::Download { path }))
            }
            Err(e) => {
                self.status.clear_copied();
                tracing::error!(error = %e, "file save failed");
                Err(as_file_save_error(e))
            }
        }
    }

    async fn prepare(&self, image: &VectorImage, id: &str) -> SockyResult<(RasterBuffer, String)> {
        let raster = self
            .rasterizer
            .rasterize_export(image)
            .await
            .inspect_err(|e| {
                self.status.clear_copied();
                tracing::error!(error = %e, "rasterization failed");
            })?;
        let file_name = self.settings.file_name(id, raster.extension());
        Ok((raster, file_name))
    }

    async fn native_share(
        &self,
        raster: &RasterBuffer,
        file_name: &str,
        id: &str,
    ) -> SockyResult<()> {
        let title = self.settings.title_for(id);
        let text = self.settings.text_for(id);
        let request = ShareRequest {
            file_name,
            mime: raster.mime(),
            bytes: raster.png_bytes(),
            title: &title,
            text: &text,
        };
        self.host.share.share(&request).await
    }
}

fn artifact(file_name: String, raster: RasterBuffer, delivery: Delivery) -> ExportArtifact {
    ExportArtifact {
        file_name,
        raster,
        delivery,
    }
}

// Final fallback steps always surface under their own error kind.
fn as_clipboard_error(e: SockyError) -> SockyError {
    match e {
        SockyError::ClipboardWrite(_) => e,
        other => SockyError::clipboard_write(other.to_string()),
    }
}

fn as_file_save_error(e: SockyError) -> SockyError {
    match e {
        SockyError::FileSave(_) => e,
        other => SockyError::file_save(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_tags_are_stable() {
        assert_eq!(Delivery::Share.as_str(), "delivered-via-share");
        assert_eq!(Delivery::Clipboard.as_str(), "delivered-via-clipboard");
        assert_eq!(
            Delivery::Download {
                path: PathBuf::from("x.png")
            }
            .as_str(),
            "delivered-via-download"
        );
    }

    #[test]
    fn final_step_errors_keep_their_kind() {
        let e = as_clipboard_error(SockyError::validation("denied"));
        assert!(matches!(e, SockyError::ClipboardWrite(_)));
        let e = as_file_save_error(SockyError::file_save("disk full"));
        assert_eq!(e.to_string(), "file save error: disk full");
    }
}
