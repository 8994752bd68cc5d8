// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use std::time::Duration;

/// Title shown in the app bar
pub const APP_TITLE: &str = "Label Camera";

/// Inline error after the permission subsystem refuses access
pub const NO_PERMISSION_MESSAGE: &str = "no permission to use camera";

/// Inline error after a still capture fails
pub const CAPTURE_FAILED_MESSAGE: &str = "error capturing image";

/// Inline error when access was granted but no viewfinder could be opened
pub const VIEWFINDER_FAILED_MESSAGE: &str = "error opening camera";

/// Status shown while a still capture is in flight
pub const CAPTURE_PENDING_STATUS: &str = "please wait…";

/// Alert title for label validation failures
pub const VALIDATION_ALERT_TITLE: &str = "Error";

/// Alert body when the submitted name is blank
pub const EMPTY_NAME_MESSAGE: &str = "name cannot be empty";

/// Title of the naming dialog
pub const LABEL_PROMPT_TITLE: &str = "Name the subject";

/// Placeholder label of the naming dialog's text field
pub const LABEL_FIELD_LABEL: &str = "Subject name";

/// Default simulated shutter latency
pub const DEFAULT_CAPTURE_DELAY: Duration = Duration::from_millis(400);

/// Default simulated still width
pub const DEFAULT_PHOTO_WIDTH: u32 = 640;

/// Default simulated still height
pub const DEFAULT_PHOTO_HEIGHT: u32 = 480;

/// Directory name used under temp and config directories
pub const APP_DIR_NAME: &str = "label-camera";

/// Terminal UI frame poll interval
pub const UI_POLL_INTERVAL: Duration = Duration::from_millis(16);
