// SPDX-License-Identifier: GPL-3.0-only

//! Camera access handlers
//!
//! Requesting access is the only way into live capture.

use crate::app::CaptureSession;
use crate::app::state::{Message, Mode};
use crate::app::task::Task;
use crate::backends::camera::PermissionResponse;
use crate::constants;
use crate::errors::PermissionError;
use tracing::{debug, error, info, warn};

impl CaptureSession {
    pub(crate) fn handle_request_camera_access(&mut self) -> Task {
        match &mut self.state.mode {
            Mode::LiveCapture(_) => {
                debug!("Camera access requested while viewfinder is open, ignoring");
                Task::none()
            }
            Mode::Browsing {
                access_pending: true,
                ..
            } => {
                warn!("Camera access request already pending, ignoring");
                Task::none()
            }
            Mode::Browsing { access_pending, .. } => {
                *access_pending = true;
                info!("Requesting camera access");
                let request = self.permission.request_access();
                Task::perform(request, Message::AccessResolved, |reason| {
                    Message::AccessResolved(Err(PermissionError::RequestFailed(format!(
                        "request aborted: {}",
                        reason
                    ))))
                })
            }
        }
    }

    pub(crate) fn handle_access_resolved(
        &mut self,
        result: Result<PermissionResponse, PermissionError>,
    ) -> Task {
        let Mode::Browsing { access_pending, .. } = &mut self.state.mode else {
            warn!("Permission answer arrived while viewfinder is open, ignoring");
            return Task::none();
        };
        *access_pending = false;

        let granted = match result {
            Ok(response) => {
                info!(
                    granted = response.granted,
                    status = %response.status,
                    can_ask_again = response.can_ask_again,
                    "Camera permission response"
                );
                response.granted
            }
            Err(e) => {
                warn!(error = %e, "Camera permission request failed");
                false
            }
        };

        if !granted {
            self.state.last_error = Some(constants::NO_PERMISSION_MESSAGE.to_string());
            return Task::none();
        }

        match self.camera.open_viewfinder() {
            Ok(viewfinder) => {
                info!(viewfinder = %viewfinder.id(), "Entering live capture");
                self.state.enter_live_capture(viewfinder);
            }
            Err(e) => {
                error!(error = %e, "Failed to open viewfinder");
                self.state.last_error = Some(constants::VIEWFINDER_FAILED_MESSAGE.to_string());
            }
        }
        Task::none()
    }
}
