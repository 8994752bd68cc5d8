// SPDX-License-Identifier: GPL-3.0-only

//! Session state management
//!
//! The screen mode is a tagged variant: a photo can only be shown while
//! browsing, and the label prompt belongs to that photo. Live capture owns
//! the viewfinder, so leaving it releases the camera.

use crate::backends::camera::{
    CapturedPicture, PermissionResponse, Viewfinder, ViewfinderId,
};
use crate::constants;
use crate::errors::{CaptureError, PermissionError};
use serde::Serialize;

/// Progress of a still capture on the open viewfinder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaptureStage {
    /// Ready for the shutter
    #[default]
    Ready,
    /// A capture call is pending
    InFlight,
}

/// A captured still and whether its naming dialog is open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPhoto {
    pub picture: CapturedPicture,
    pub prompt_open: bool,
}

/// Live viewfinder state
#[derive(Debug)]
pub struct LiveCapture {
    viewfinder: Viewfinder,
    pub(crate) stage: CaptureStage,
    /// Photo shown before the viewfinder opened, restored on cancel
    previous: Option<CapturedPhoto>,
}

impl LiveCapture {
    pub fn viewfinder_id(&self) -> ViewfinderId {
        self.viewfinder.id()
    }
}

/// Screen mode
#[derive(Debug)]
pub enum Mode {
    /// App bar, last photo and label
    Browsing {
        photo: Option<CapturedPhoto>,
        /// A permission request is pending
        access_pending: bool,
    },
    /// Camera viewfinder
    LiveCapture(LiveCapture),
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Browsing {
            photo: None,
            access_pending: false,
        }
    }
}

/// Field-less view of [`Mode`] for rendering and serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModeKind {
    Browsing,
    LiveCapture,
}

/// The single in-memory record behind the screen
#[derive(Debug, Default)]
pub struct SessionState {
    pub(crate) mode: Mode,
    pub(crate) last_error: Option<String>,
    pub(crate) subject_name: String,
}

impl SessionState {
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn mode_kind(&self) -> ModeKind {
        match self.mode {
            Mode::Browsing { .. } => ModeKind::Browsing,
            Mode::LiveCapture(_) => ModeKind::LiveCapture,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self.mode, Mode::LiveCapture(_))
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Photo committed by the last successful capture, absent while live
    pub fn captured_photo(&self) -> Option<&CapturedPicture> {
        match &self.mode {
            Mode::Browsing {
                photo: Some(photo), ..
            } => Some(&photo.picture),
            _ => None,
        }
    }

    pub fn subject_name(&self) -> &str {
        &self.subject_name
    }

    pub fn label_prompt_visible(&self) -> bool {
        matches!(
            &self.mode,
            Mode::Browsing {
                photo: Some(CapturedPhoto {
                    prompt_open: true,
                    ..
                }),
                ..
            }
        )
    }

    /// Transient status; only a pending capture on the open viewfinder has one
    pub fn status_message(&self) -> &str {
        match &self.mode {
            Mode::LiveCapture(live) if live.stage == CaptureStage::InFlight => {
                constants::CAPTURE_PENDING_STATUS
            }
            _ => "",
        }
    }

    pub fn access_pending(&self) -> bool {
        matches!(
            self.mode,
            Mode::Browsing {
                access_pending: true,
                ..
            }
        )
    }

    pub fn capture_in_flight(&self) -> bool {
        matches!(&self.mode, Mode::LiveCapture(live) if live.stage == CaptureStage::InFlight)
    }

    pub fn viewfinder_id(&self) -> Option<ViewfinderId> {
        match &self.mode {
            Mode::LiveCapture(live) => Some(live.viewfinder_id()),
            Mode::Browsing { .. } => None,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            mode: self.mode_kind(),
            last_error: self.last_error.clone().unwrap_or_default(),
            captured_photo: self.captured_photo().cloned(),
            subject_name: self.subject_name.clone(),
            label_prompt_visible: self.label_prompt_visible(),
            status_message: self.status_message().to_string(),
            access_pending: self.access_pending(),
        }
    }

    // ===== Primitive transitions (called by the handlers) =====

    /// Open live capture around `viewfinder`, parking the current photo
    pub(crate) fn enter_live_capture(&mut self, viewfinder: Viewfinder) {
        let previous = match std::mem::take(&mut self.mode) {
            Mode::Browsing { photo, .. } => photo.map(|photo| CapturedPhoto {
                prompt_open: false,
                ..photo
            }),
            Mode::LiveCapture(live) => live.previous,
        };
        self.mode = Mode::LiveCapture(LiveCapture {
            viewfinder,
            stage: CaptureStage::Ready,
            previous,
        });
        self.last_error = None;
    }

    /// Leave live capture without a photo, restoring the parked one
    pub(crate) fn leave_live_capture(&mut self) {
        if let Mode::LiveCapture(live) = std::mem::take(&mut self.mode) {
            // Dropping `live` releases the viewfinder
            self.mode = Mode::Browsing {
                photo: live.previous,
                access_pending: false,
            };
        }
    }

    /// Commit a captured still: back to browsing with the naming dialog open
    pub(crate) fn commit_capture(&mut self, picture: CapturedPicture) {
        self.mode = Mode::Browsing {
            photo: Some(CapturedPhoto {
                picture,
                prompt_open: true,
            }),
            access_pending: false,
        };
        self.last_error = None;
        self.subject_name.clear();
    }

    pub(crate) fn close_label_prompt(&mut self) {
        if let Mode::Browsing {
            photo: Some(photo), ..
        } = &mut self.mode
        {
            photo.prompt_open = false;
        }
    }
}

/// Read-only render model handed to presentation code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub mode: ModeKind,
    pub last_error: String,
    pub captured_photo: Option<CapturedPicture>,
    pub subject_name: String,
    pub label_prompt_visible: bool,
    pub status_message: String,
    pub access_pending: bool,
}

/// The five user gestures the presentation surface forwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    RequestAccess,
    Capture,
    CancelLiveView,
    SubmitLabel(String),
    DismissLabelPrompt,
}

impl From<Gesture> for Message {
    fn from(gesture: Gesture) -> Self {
        match gesture {
            Gesture::RequestAccess => Message::RequestCameraAccess,
            Gesture::Capture => Message::CapturePhoto,
            Gesture::CancelLiveView => Message::CancelLiveCapture,
            Gesture::SubmitLabel(text) => Message::SubmitLabel(text),
            Gesture::DismissLabelPrompt => Message::DismissLabelPrompt,
        }
    }
}

/// Everything that can change the session
#[derive(Debug, Clone)]
pub enum Message {
    // ===== User gestures =====
    RequestCameraAccess,
    CapturePhoto,
    CancelLiveCapture,
    SubmitLabel(String),
    DismissLabelPrompt,

    // ===== Subsystem resolutions =====
    AccessResolved(Result<PermissionResponse, PermissionError>),
    CaptureResolved {
        viewfinder: ViewfinderId,
        result: Result<CapturedPicture, CaptureError>,
    },
}
