use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::foundation::error::SockyResult;
use crate::raster::RasterBuffer;

/// What the host environment can do, probed by the caller and injected explicitly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HostCapabilities {
    /// A system-level share picker is available.
    pub native_share: bool,
}

/// A named file handed to the native share picker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareRequest<'a> {
    pub file_name: &'a str,
    pub mime: &'a str,
    pub bytes: &'a [u8],
    pub title: &'a str,
    pub text: &'a str,
}

/// Native share picker.
///
/// Returns `SockyError::ShareCancelled` when the user dismisses the picker and
/// `SockyError::Share` for any other failure. Both trigger the caller's fallback.
#[async_trait]
pub trait ShareTarget: Send + Sync {
    async fn share(&self, request: &ShareRequest<'_>) -> SockyResult<()>;
}

/// System clipboard accepting image entries.
#[async_trait]
pub trait ClipboardTarget: Send + Sync {
    async fn write_image(&self, raster: &RasterBuffer) -> SockyResult<()>;
}

/// Direct file save. Returns where the file ended up.
#[async_trait]
pub trait SaveTarget: Send + Sync {
    async fn save(&self, file_name: &str, raster: &RasterBuffer) -> SockyResult<PathBuf>;
}

/// Delivery channels available to an export coordinator.
#[derive(Clone)]
pub struct ExportHost {
    pub capabilities: HostCapabilities,
    pub share: Arc<dyn ShareTarget>,
    pub clipboard: Arc<dyn ClipboardTarget>,
    pub saver: Arc<dyn SaveTarget>,
}

impl std::fmt::Debug for ExportHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportHost")
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}
