use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;

use crate::foundation::error::{SockyError, SockyResult};

const ID_PLACEHOLDER: &str = "{id}";

/// Export configuration. Every field has a default, so a partial JSON file is enough.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Lowercase filename stem, as in `<label>-<id>.png`.
    pub label: String,
    /// Share sheet title; `{id}` is replaced with the identifier.
    pub share_title: String,
    /// Share sheet body text; `{id}` is replaced with the identifier.
    pub share_text: String,
    /// How long the "copied" indicator stays on after a clipboard copy.
    pub copied_window_ms: u64,
    /// Directory used by file saves.
    pub out_dir: PathBuf,
    /// External share helper. Native share is unavailable when unset or not on `PATH`.
    pub share_command: Option<String>,
    /// Extra arguments passed before the file path.
    pub share_args: Vec<String>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            label: "sockybara".to_owned(),
            share_title: "Sockybara #{id}".to_owned(),
            share_text: "Check out my Sockybara #{id}!".to_owned(),
            copied_window_ms: 2_000,
            out_dir: PathBuf::from("."),
            share_command: None,
            share_args: Vec::new(),
        }
    }
}

impl ExportSettings {
    pub fn from_path(path: &Path) -> SockyResult<Self> {
        let f = File::open(path).with_context(|| format!("open settings '{}'", path.display()))?;
        let settings: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| SockyError::serde(format!("settings '{}': {e}", path.display())))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> SockyResult<()> {
        if self.label.is_empty() {
            return Err(SockyError::validation("label must not be empty"));
        }
        if self.label.contains(['/', '\\']) {
            return Err(SockyError::validation(
                "label must not contain path separators",
            ));
        }
        Ok(())
    }

    pub fn copied_window(&self) -> Duration {
        Duration::from_millis(self.copied_window_ms)
    }

    /// `<label>-<id>.<ext>`
    pub fn file_name(&self, id: &str, ext: &str) -> String {
        format!("{}-{id}.{ext}", self.label)
    }

    pub fn title_for(&self, id: &str) -> String {
        self.share_title.replace(ID_PLACEHOLDER, id)
    }

    pub fn text_for(&self, id: &str) -> String {
        self.share_text.replace(ID_PLACEHOLDER, id)
    }
}
