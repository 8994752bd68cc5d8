// SPDX-License-Identifier: GPL-3.0-only
// Shared types for camera backend abstraction

//! Shared types for camera backends

use serde::Serialize;
use uuid::Uuid;

/// Outcome class reported by the permission subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PermissionStatus {
    /// The user has not answered yet
    #[default]
    Undetermined,
    /// Access granted
    Granted,
    /// Access refused
    Denied,
}

impl std::fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PermissionStatus::Undetermined => write!(f, "undetermined"),
            PermissionStatus::Granted => write!(f, "granted"),
            PermissionStatus::Denied => write!(f, "denied"),
        }
    }
}

/// Answer to a camera permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionResponse {
    /// Whether the camera may be used
    pub granted: bool,
    /// Detailed status
    pub status: PermissionStatus,
    /// Whether asking again could still change the answer
    pub can_ask_again: bool,
}

impl PermissionResponse {
    pub fn granted() -> Self {
        Self {
            granted: true,
            status: PermissionStatus::Granted,
            can_ask_again: true,
        }
    }

    pub fn denied(can_ask_again: bool) -> Self {
        Self {
            granted: false,
            status: PermissionStatus::Denied,
            can_ask_again,
        }
    }
}

/// Handle to a still image returned by the capture subsystem
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CapturedPicture {
    /// Location of the encoded image (e.g. `file:///tmp/IMG_1.jpg`)
    pub uri: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl CapturedPicture {
    pub fn new(uri: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            uri: uri.into(),
            width,
            height,
        }
    }

    /// Filesystem path for `file://` URIs
    pub fn file_path(&self) -> Option<std::path::PathBuf> {
        self.uri
            .strip_prefix("file://")
            .map(std::path::PathBuf::from)
    }
}

/// Identity of one opened viewfinder
///
/// Every entry into live capture opens a fresh viewfinder, so capture results
/// can be matched to the viewfinder they were requested on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewfinderId(Uuid);

impl ViewfinderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ViewfinderId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ViewfinderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Error types for backend operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// No camera device to open
    DeviceNotFound(String),
    /// Camera is held by someone else
    Busy,
    /// Other error
    Other(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::DeviceNotFound(msg) => write!(f, "Device not found: {}", msg),
            BackendError::Busy => write!(f, "Camera is busy"),
            BackendError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}
