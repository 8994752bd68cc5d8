// SPDX-License-Identifier: MPL-2.0

//! Error types for the capture session

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Configuration errors
    Config(String),
    /// Generic error with message
    Other(String),
}

/// Permission subsystem errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionError {
    /// The request itself could not be completed
    RequestFailed(String),
}

/// Still capture errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// The viewfinder was torn down before the capture completed
    Released,
    /// Hardware or OS-level failure while taking the picture
    Hardware(String),
    /// The still could not be encoded or written
    Encoding(String),
}

/// Label validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Name is empty after trimming whitespace
    EmptyName,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for PermissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionError::RequestFailed(msg) => write!(f, "Permission request failed: {}", msg),
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Released => write!(f, "Viewfinder was released"),
            CaptureError::Hardware(msg) => write!(f, "Hardware error: {}", msg),
            CaptureError::Encoding(msg) => write!(f, "Encoding failed: {}", msg),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyName => write!(f, "{}", crate::constants::EMPTY_NAME_MESSAGE),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for PermissionError {}
impl std::error::Error for CaptureError {}
impl std::error::Error for ValidationError {}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<std::io::Error> for CaptureError {
    fn from(err: std::io::Error) -> Self {
        CaptureError::Encoding(err.to_string())
    }
}

impl From<image::ImageError> for CaptureError {
    fn from(err: image::ImageError) -> Self {
        CaptureError::Encoding(err.to_string())
    }
}
