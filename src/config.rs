// SPDX-License-Identifier: GPL-3.0-only

//! Configuration for the simulated devices and the terminal surface
//!
//! The capture session itself never reads this; it only decides how the
//! stand-in permission and camera subsystems behave when the binary runs
//! without real hardware.

use crate::constants;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How the simulated permission subsystem answers
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum PermissionBehaviour {
    /// Always grant
    #[default]
    Grant,
    /// Always deny
    Deny,
    /// The request itself fails
    Fail,
    /// Deny the first `n` requests, then grant
    GrantAfterDenials(u32),
}

/// When the simulated camera fails a still capture
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum CaptureFailure {
    /// Every capture succeeds
    #[default]
    Never,
    /// Every capture fails
    Always,
    /// Every n-th capture fails (1-based)
    EveryNth(u32),
}

impl CaptureFailure {
    /// Whether the capture with this 1-based sequence number should fail
    pub fn fails(&self, sequence: u32) -> bool {
        match self {
            CaptureFailure::Never => false,
            CaptureFailure::Always => true,
            CaptureFailure::EveryNth(0) => false,
            CaptureFailure::EveryNth(n) => sequence % n == 0,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Simulated permission answer
    pub permission: PermissionBehaviour,
    /// Simulated shutter latency in milliseconds
    pub capture_delay_ms: u64,
    /// Simulated capture failure pattern
    pub capture_failure: CaptureFailure,
    /// Width of simulated stills
    pub photo_width: u32,
    /// Height of simulated stills
    pub photo_height: u32,
    /// Scratch directory for simulated stills (None = temp dir)
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            permission: PermissionBehaviour::default(),
            capture_delay_ms: constants::DEFAULT_CAPTURE_DELAY.as_millis() as u64,
            capture_failure: CaptureFailure::default(),
            photo_width: constants::DEFAULT_PHOTO_WIDTH,
            photo_height: constants::DEFAULT_PHOTO_HEIGHT,
            output_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load from an explicit path, else the user config directory, else defaults
    pub fn load_or_default(path: Option<&Path>) -> AppResult<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                debug!("No configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// `~/.config/label-camera/config.json` on Linux
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(constants::APP_DIR_NAME).join("config.json"))
    }

    /// Directory simulated stills are written to
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(constants::APP_DIR_NAME))
    }

    fn validate(&self) -> AppResult<()> {
        if self.photo_width == 0 || self.photo_height == 0 {
            return Err(AppError::Config(format!(
                "photo size must be non-zero, got {}x{}",
                self.photo_width, self.photo_height
            )));
        }
        Ok(())
    }
}
