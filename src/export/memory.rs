//! Recording host adapters for tests and dry runs.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::export::host::{ClipboardTarget, SaveTarget, ShareRequest, ShareTarget};
use crate::foundation::error::{SockyError, SockyResult};
use crate::raster::RasterBuffer;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// How a [`ScriptedShare`] answers every request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShareScript {
    Accept,
    Cancel,
    Fail(String),
}

/// Owned copy of a [`ShareRequest`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedShare {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
    pub title: String,
    pub text: String,
}

#[derive(Debug)]
pub struct ScriptedShare {
    script: ShareScript,
    calls: Mutex<Vec<RecordedShare>>,
}

impl ScriptedShare {
    pub fn new(script: ShareScript) -> Self {
        Self {
            script,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedShare> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl ShareTarget for ScriptedShare {
    async fn share(&self, request: &ShareRequest<'_>) -> SockyResult<()> {
        lock(&self.calls).push(RecordedShare {
            file_name: request.file_name.to_owned(),
            mime: request.mime.to_owned(),
            bytes: request.bytes.to_vec(),
            title: request.title.to_owned(),
            text: request.text.to_owned(),
        });
        match &self.script {
            ShareScript::Accept => Ok(()),
            ShareScript::Cancel => Err(SockyError::ShareCancelled),
            ShareScript::Fail(msg) => Err(SockyError::share(msg.clone())),
        }
    }
}

/// Clipboard that keeps every written image, or rejects writes with a fixed reason.
#[derive(Debug, Default)]
pub struct InMemoryClipboard {
    reject: Option<String>,
    writes: Mutex<Vec<RasterBuffer>>,
}

impl InMemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            reject: Some(reason.into()),
            writes: Mutex::new(Vec::new()),
        }
    }

    /// Attempted writes, including rejected ones.
    pub fn writes(&self) -> Vec<RasterBuffer> {
        lock(&self.writes).clone()
    }
}

#[async_trait]
impl ClipboardTarget for InMemoryClipboard {
    async fn write_image(&self, raster: &RasterBuffer) -> SockyResult<()> {
        lock(&self.writes).push(raster.clone());
        match &self.reject {
            Some(reason) => Err(SockyError::clipboard_write(reason.clone())),
            None => Ok(()),
        }
    }
}

/// File saver that records names and buffers instead of touching the disk.
#[derive(Debug, Default)]
pub struct InMemorySaver {
    reject: Option<String>,
    saved: Mutex<Vec<(String, RasterBuffer)>>,
}

impl InMemorySaver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            reject: Some(reason.into()),
            saved: Mutex::new(Vec::new()),
        }
    }

    /// Attempted saves, including rejected ones.
    pub fn saved(&self) -> Vec<(String, RasterBuffer)> {
        lock(&self.saved).clone()
    }
}

#[async_trait]
impl SaveTarget for InMemorySaver {
    async fn save(&self, file_name: &str, raster: &RasterBuffer) -> SockyResult<PathBuf> {
        lock(&self.saved).push((file_name.to_owned(), raster.clone()));
        match &self.reject {
            Some(reason) => Err(SockyError::file_save(reason.clone())),
            None => Ok(PathBuf::from("memory").join(file_name)),
        }
    }
}
