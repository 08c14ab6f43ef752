//! Host adapters for desktop environments.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::process::Stdio;
#[cfg(not(target_os = "macos"))]
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::process::Command;

use crate::export::host::{ClipboardTarget, SaveTarget, ShareRequest, ShareTarget};
use crate::foundation::error::{SockyError, SockyResult};
use crate::raster::RasterBuffer;

pub const SHARE_TITLE_ENV: &str = "SOCKYBARA_SHARE_TITLE";
pub const SHARE_TEXT_ENV: &str = "SOCKYBARA_SHARE_TEXT";
pub const SHARE_MIME_ENV: &str = "SOCKYBARA_SHARE_MIME";

/// Native share through an external helper program.
///
/// Each call stages the image in a fresh private directory under the staging dir and
/// passes its path as the last argument. Title, text and MIME type go through the
/// `SOCKYBARA_SHARE_*` environment variables.
/// Exit status 0 means shared, any other status means the user backed out.
#[derive(Clone, Debug)]
pub struct CommandShare {
    program: String,
    args: Vec<String>,
    staging_dir: PathBuf,
}

impl CommandShare {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            staging_dir: std::env::temp_dir(),
        }
    }

    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = dir.into();
        self
    }

    /// Return `true` when the helper can be found, either as a path or on `PATH`.
    pub fn is_available(&self) -> bool {
        find_program(&self.program).is_some()
    }
}

#[async_trait]
impl ShareTarget for CommandShare {
    async fn share(&self, request: &ShareRequest<'_>) -> SockyResult<()> {
        if !is_plain_file_name(request.file_name) {
            return Err(SockyError::share(format!(
                "invalid file name \"{}\"",
                request.file_name
            )));
        }
        tokio::fs::create_dir_all(&self.staging_dir)
            .await
            .map_err(|e| SockyError::share(format!("create staging dir: {e}")))?;
        let stage = tempfile::Builder::new()
            .prefix("sockybara-share-")
            .tempdir_in(&self.staging_dir)
            .map_err(|e| SockyError::share(format!("create staging dir: {e}")))?;
        let staged = stage.path().join(request.file_name);
        tokio::fs::write(&staged, request.bytes)
            .await
            .map_err(|e| SockyError::share(format!("stage '{}': {e}", staged.display())))?;

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(&staged)
            .env(SHARE_TITLE_ENV, request.title)
            .env(SHARE_TEXT_ENV, request.text)
            .env(SHARE_MIME_ENV, request.mime)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .await;

        if let Err(e) = stage.close() {
            tracing::debug!(error = %e, "staged share file not removed");
        }

        match status {
            Ok(s) if s.success() => Ok(()),
            Ok(s) => {
                tracing::debug!(status = %s, "share helper declined");
                Err(SockyError::ShareCancelled)
            }
            Err(e) => Err(SockyError::share(format!(
                "spawn share helper '{}': {e}",
                self.program
            ))),
        }
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != ".." && !name.contains(['/', '\\'])
}

fn find_program(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(program))
        .find(|p| p.is_file())
}

/// Saves files into a fixed directory, creating it on first use.
#[derive(Clone, Debug)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl SaveTarget for DirectorySaver {
    async fn save(&self, file_name: &str, raster: &RasterBuffer) -> SockyResult<PathBuf> {
        if !is_plain_file_name(file_name) {
            return Err(SockyError::file_save(format!(
                "invalid file name \"{file_name}\""
            )));
        }
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            SockyError::file_save(format!(
                "failed to create output directory '{}': {e}",
                self.dir.display()
            ))
        })?;

        let path = self.dir.join(file_name);
        tokio::fs::write(&path, raster.png_bytes())
            .await
            .map_err(|e| SockyError::file_save(format!("write '{}': {e}", path.display())))?;
        Ok(path)
    }
}

/// Stand-in for hosts without a share picker. Always fails, so callers fall back.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoShare;

#[async_trait]
impl ShareTarget for NoShare {
    async fn share(&self, _request: &ShareRequest<'_>) -> SockyResult<()> {
        Err(SockyError::share("native share is not available on this host"))
    }
}

/// The OS clipboard, via `arboard`.
///
/// X11 and Wayland only serve a copied image while a clipboard handle is alive, so the
/// handle opened by the first write is kept for the lifetime of this value. macOS
/// handles are not `Send` and the pasteboard keeps its contents anyway, so there a
/// handle is opened per write.
#[derive(Default)]
pub struct SystemClipboard {
    #[cfg(not(target_os = "macos"))]
    handle: Mutex<Option<arboard::Clipboard>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a clipboard handle is currently held open.
    pub fn is_open(&self) -> bool {
        #[cfg(not(target_os = "macos"))]
        {
            lock(&self.handle).is_some()
        }
        #[cfg(target_os = "macos")]
        {
            false
        }
    }

    #[cfg(not(target_os = "macos"))]
    fn with_clipboard<R>(
        &self,
        f: impl FnOnce(&mut arboard::Clipboard) -> Result<R, arboard::Error>,
    ) -> SockyResult<R> {
        let mut handle = lock(&self.handle);
        if handle.is_none() {
            *handle = Some(open_clipboard()?);
        }
        match handle.as_mut() {
            Some(clipboard) => {
                f(clipboard).map_err(|e| SockyError::clipboard_write(e.to_string()))
            }
            None => Err(SockyError::clipboard_write("clipboard handle unavailable")),
        }
    }

    #[cfg(target_os = "macos")]
    fn with_clipboard<R>(
        &self,
        f: impl FnOnce(&mut arboard::Clipboard) -> Result<R, arboard::Error>,
    ) -> SockyResult<R> {
        let mut clipboard = open_clipboard()?;
        f(&mut clipboard).map_err(|e| SockyError::clipboard_write(e.to_string()))
    }
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("open", &self.is_open())
            .finish()
    }
}

fn open_clipboard() -> SockyResult<arboard::Clipboard> {
    arboard::Clipboard::new()
        .map_err(|e| SockyError::clipboard_write(format!("open clipboard: {e}")))
}

#[cfg(not(target_os = "macos"))]
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl ClipboardTarget for SystemClipboard {
    async fn write_image(&self, raster: &RasterBuffer) -> SockyResult<()> {
        let rgba = raster
            .decode_rgba8()
            .map_err(|e| SockyError::clipboard_write(e.to_string()))?;
        let (width, height) = rgba.dimensions();
        let image = arboard::ImageData {
            width: width as usize,
            height: height as usize,
            bytes: Cow::Owned(rgba.into_raw()),
        };
        self.with_clipboard(|clipboard| clipboard.set_image(image))
    }
}
