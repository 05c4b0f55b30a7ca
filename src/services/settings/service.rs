use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::models::settings::TimelineSettings;

const SETTINGS_FILE: &str = "timeline.toml";

/// File-backed settings store.
pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Settings service rooted in the platform config directory, falling back
    /// to the working directory when no home directory can be resolved.
    pub fn from_default_location() -> Self {
        let path = ProjectDirs::from("com", "TableTimeline", "TableTimeline")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE));
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, returning defaults when the file does not exist yet.
    pub fn load(&self) -> Result<TimelineSettings> {
        if !self.path.exists() {
            log::debug!("No settings at {}, using defaults", self.path.display());
            return Ok(TimelineSettings::default());
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read settings from {}", self.path.display()))?;
        let settings: TimelineSettings = toml::from_str(&data)
            .with_context(|| format!("failed to parse settings from {}", self.path.display()))?;
        settings
            .window
            .validate()
            .with_context(|| format!("invalid operating window in {}", self.path.display()))?;

        log::info!("Loaded timeline settings from {}", self.path.display());
        Ok(settings)
    }

    pub fn save(&self, settings: &TimelineSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create dir {}", parent.display()))?;
            }
        }

        let data = toml::to_string_pretty(settings).context("failed to serialize settings")?;
        fs::write(&self.path, data)
            .with_context(|| format!("failed to write settings to {}", self.path.display()))?;
        Ok(())
    }
}
