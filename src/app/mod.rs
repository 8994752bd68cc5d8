// SPDX-License-Identifier: MPL-2.0

//! Capture session controller
//!
//! # Architecture
//!
//! - `state`: session state types (SessionState, Mode, Message, Gesture)
//! - `update`: message dispatcher
//! - `handlers`: transition operations grouped by concern
//! - `task`: deferred work returned from `update`
//! - `runtime`: drives tasks and feeds their results back
//! - `alert`: modal alert channel
//!
//! # Main Types
//!
//! - `CaptureSession`: owns the state and the device collaborators
//! - `Message`: all user gestures and subsystem resolutions

mod alert;
mod handlers;
mod runtime;
mod state;
mod task;
mod update;

pub use alert::{Alert, AlertChannel, LogAlerts};
pub use runtime::SessionRuntime;
pub use state::{
    CaptureStage, CapturedPhoto, Gesture, LiveCapture, Message, Mode, ModeKind, SessionSnapshot,
    SessionState,
};
pub use task::Task;

use crate::backends::camera::{CameraBackend, PermissionBackend};
use std::sync::Arc;

/// Single source of truth for the screen
///
/// All mutation goes through [`CaptureSession::update`] (or the direct
/// transition methods it routes to); presentation code only reads
/// [`CaptureSession::state`].
pub struct CaptureSession {
    state: SessionState,
    permission: Arc<dyn PermissionBackend>,
    camera: Arc<dyn CameraBackend>,
    alerts: Arc<dyn AlertChannel>,
}

impl CaptureSession {
    pub fn new(
        permission: Arc<dyn PermissionBackend>,
        camera: Arc<dyn CameraBackend>,
        alerts: Arc<dyn AlertChannel>,
    ) -> Self {
        Self {
            state: SessionState::default(),
            permission,
            camera,
            alerts,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }
}

impl std::fmt::Debug for CaptureSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureSession")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
