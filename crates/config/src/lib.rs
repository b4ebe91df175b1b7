use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

// ── Store config ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Root of the local state directory.  Overridden at runtime by the
    /// `RXDESK_STATE_DIR` environment variable when set.
    pub state_dir: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            state_dir: ".rxdesk".to_string(),
        }
    }
}

// ── Review config ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Quiet period between the last edit and the autosave write.
    pub autosave_debounce_ms: u64,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            autosave_debounce_ms: 350,
        }
    }
}

// ── Calendar config ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Plan length preselected when a session has no saved calendar state.
    pub default_weeks: u32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self { default_weeks: 4 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub review: ReviewConfig,
    pub calendar: CalendarConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let mut config = Self::default();
        if let Ok(raw) = fs::read_to_string(path) {
            config = toml::from_str(&raw)?;
        }

        if let Ok(dir) = env::var("RXDESK_STATE_DIR") {
            if !dir.is_empty() {
                config.store.state_dir = dir;
            }
        }
        if let Ok(level) = env::var("RXDESK_LOG_LEVEL") {
            if !level.is_empty() {
                config.telemetry.log_level = level;
            }
        }

        Ok(config)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let rendered = toml::to_string_pretty(self)?;
        fs::write(path, rendered)?;
        Ok(())
    }

    /// Directory holding the per-trace-id review records.
    pub fn reviews_dir(&self) -> PathBuf {
        Path::new(&self.store.state_dir).join("reviews")
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.review.autosave_debounce_ms)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
