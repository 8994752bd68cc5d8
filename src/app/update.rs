// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! The `update()` function routes each message to a focused handler method
//! implemented in the `handlers` submodules:
//!
//! - `handlers::permission`: camera access requests and their answers
//! - `handlers::capture`: still capture and leaving the viewfinder
//! - `handlers::label`: naming dialog

use crate::app::CaptureSession;
use crate::app::state::Message;
use crate::app::task::Task;

impl CaptureSession {
    /// Main message handler
    ///
    /// Each call applies one message as one state update; any asynchronous
    /// follow-up comes back as a new message through the returned task.
    pub fn update(&mut self, message: Message) -> Task {
        match message {
            // ===== User gestures =====
            Message::RequestCameraAccess => self.handle_request_camera_access(),
            Message::CapturePhoto => self.handle_capture_photo(),
            Message::CancelLiveCapture => self.handle_cancel_live_capture(),
            Message::SubmitLabel(text) => self.handle_submit_label(text),
            Message::DismissLabelPrompt => self.handle_dismiss_label_prompt(),

            // ===== Subsystem resolutions =====
            Message::AccessResolved(result) => self.handle_access_resolved(result),
            Message::CaptureResolved { viewfinder, result } => {
                self.handle_capture_resolved(viewfinder, result)
            }
        }
    }
}
