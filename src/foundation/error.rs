pub type SockyResult<T> = Result<T, SockyError>;

#[derive(thiserror::Error, Debug)]
pub enum SockyError {
    /// The host could not provide a 2D drawing surface.
    #[error("render surface error: {0}")]
    RenderSurface(String),

    /// The serialized vector payload did not decode into an image.
    #[error("decode error: {0}")]
    Decode(String),

    /// The user dismissed the native share sheet.
    #[error("share cancelled")]
    ShareCancelled,

    #[error("share error: {0}")]
    Share(String),

    #[error("clipboard write error: {0}")]
    ClipboardWrite(String),

    #[error("file save error: {0}")]
    FileSave(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SockyError {
    pub fn render_surface(msg: impl Into<String>) -> Self {
        Self::RenderSurface(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn share(msg: impl Into<String>) -> Self {
        Self::Share(msg.into())
    }

    pub fn clipboard_write(msg: impl Into<String>) -> Self {
        Self::ClipboardWrite(msg.into())
    }

    pub fn file_save(msg: impl Into<String>) -> Self {
        Self::FileSave(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Errors raised while producing the raster buffer. These end an export
    /// immediately since there is nothing left to deliver.
    pub fn is_raster_failure(&self) -> bool {
        matches!(self, Self::RenderSurface(_) | Self::Decode(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            SockyError::render_surface("x")
                .to_string()
                .contains("render surface error:")
        );
        assert!(SockyError::decode("x").to_string().contains("decode error:"));
        assert!(
            SockyError::clipboard_write("x")
                .to_string()
                .contains("clipboard write error:")
        );
        assert!(
            SockyError::file_save("x")
                .to_string()
                .contains("file save error:")
        );
        assert!(
            SockyError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert_eq!(SockyError::ShareCancelled.to_string(), "share cancelled");
    }

    #[test]
    fn raster_failures_are_classified() {
        assert!(SockyError::render_surface("no 2d").is_raster_failure());
        assert!(SockyError::decode("bad").is_raster_failure());
        assert!(!SockyError::ShareCancelled.is_raster_failure());
        assert!(!SockyError::clipboard_write("denied").is_raster_failure());
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = SockyError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
