// SPDX-License-Identifier: GPL-3.0-only

//! Capture operations handlers
//!
//! Handles still capture on the open viewfinder and leaving live capture.

use crate::app::CaptureSession;
use crate::app::state::{CaptureStage, Message, Mode};
use crate::app::task::Task;
use crate::backends::camera::{CapturedPicture, ViewfinderId};
use crate::constants;
use crate::errors::CaptureError;
use tracing::{debug, error, info, warn};

impl CaptureSession {
    pub(crate) fn handle_capture_photo(&mut self) -> Task {
        let Mode::LiveCapture(live) = &mut self.state.mode else {
            debug!("Capture requested without an open viewfinder, ignoring");
            return Task::none();
        };

        // One physical camera, one shutter: overlapping requests are dropped
        if live.stage == CaptureStage::InFlight {
            warn!("Capture already in flight, ignoring");
            return Task::none();
        }

        live.stage = CaptureStage::InFlight;
        let viewfinder = live.viewfinder_id();
        self.state.last_error = None;

        info!(viewfinder = %viewfinder, "Capturing photo...");
        let capture = self.camera.capture(viewfinder);
        Task::perform(
            capture,
            move |result| Message::CaptureResolved { viewfinder, result },
            move |reason| Message::CaptureResolved {
                viewfinder,
                result: Err(CaptureError::Hardware(format!("capture aborted: {}", reason))),
            },
        )
    }

    pub(crate) fn handle_capture_resolved(
        &mut self,
        viewfinder: ViewfinderId,
        result: Result<CapturedPicture, CaptureError>,
    ) -> Task {
        let live = match &mut self.state.mode {
            Mode::LiveCapture(live) if live.viewfinder_id() == viewfinder => live,
            _ => {
                warn!(
                    viewfinder = %viewfinder,
                    ok = result.is_ok(),
                    "Discarding capture result for a closed viewfinder"
                );
                return Task::none();
            }
        };

        match result {
            Ok(picture) => {
                info!(
                    uri = %picture.uri,
                    width = picture.width,
                    height = picture.height,
                    "Photo captured"
                );
                self.state.commit_capture(picture);
            }
            Err(e) => {
                error!(error = %e, "Failed to capture photo");
                live.stage = CaptureStage::Ready;
                self.state.last_error = Some(constants::CAPTURE_FAILED_MESSAGE.to_string());
            }
        }
        Task::none()
    }

    pub(crate) fn handle_cancel_live_capture(&mut self) -> Task {
        if !self.state.is_live() {
            debug!("Cancel requested outside live capture, ignoring");
            return Task::none();
        }
        if self.state.capture_in_flight() {
            info!("Closing viewfinder with a capture in flight; its result will be dropped");
        } else {
            info!("Closing viewfinder");
        }
        self.state.leave_live_capture();
        Task::none()
    }
}

#[cfg(test)]
mod tests {
    use crate::app::handlers::test_support::*;
    use crate::app::{Message, ModeKind};
    use crate::backends::camera::CapturedPicture;
    use crate::constants;
    use crate::errors::CaptureError;
    use std::sync::Arc;

    fn photo(uri: &str) -> CapturedPicture {
        CapturedPicture::new(uri, 100, 100)
    }

    #[test]
    fn test_capture_success_commits_together() {
        let camera = Arc::new(StubCamera::with_results(vec![Ok(photo("file://x.jpg"))]));
        let mut session = session(granting(), Arc::clone(&camera), Arc::default());
        drive(&mut session, Message::RequestCameraAccess);

        drive(&mut session, Message::CapturePhoto);

        let state = session.state();
        assert_eq!(state.mode_kind(), ModeKind::Browsing);
        assert!(state.label_prompt_visible());
        assert_eq!(state.captured_photo(), Some(&photo("file://x.jpg")));
        assert_eq!(state.status_message(), "");
        assert_eq!(camera.open_count(), 0, "viewfinder released after capture");
    }

    #[test]
    fn test_status_set_before_capture_resolves() {
        let camera = Arc::new(StubCamera::with_results(vec![Ok(photo("file://x.jpg"))]));
        let mut session = session(granting(), camera, Arc::default());
        drive(&mut session, Message::RequestCameraAccess);

        let task = session.update(Message::CapturePhoto);
        assert_eq!(session.state().status_message(), constants::CAPTURE_PENDING_STATUS);
        assert_eq!(session.state().last_error(), None);

        for message in resolve(task) {
            drive(&mut session, message);
        }
        assert_eq!(session.state().status_message(), "");
    }

    #[test]
    fn test_capture_failure_keeps_viewfinder() {
        let camera = Arc::new(StubCamera::with_results(vec![Err(CaptureError::Hardware(
            "sensor".into(),
        ))]));
        let mut session = session(granting(), Arc::clone(&camera), Arc::default());
        drive(&mut session, Message::RequestCameraAccess);

        drive(&mut session, Message::CapturePhoto);

        let state = session.state();
        assert_eq!(state.mode_kind(), ModeKind::LiveCapture);
        assert_eq!(state.last_error(), Some(constants::CAPTURE_FAILED_MESSAGE));
        assert_eq!(state.status_message(), "");
        assert!(state.captured_photo().is_none());
        assert!(!state.capture_in_flight());
        assert_eq!(camera.open_count(), 1);
    }

    #[test]
    fn test_retry_after_failure_succeeds() {
        let camera = Arc::new(StubCamera::with_results(vec![
            Err(CaptureError::Hardware("sensor".into())),
            Ok(photo("file://y.jpg")),
        ]));
        let mut session = session(granting(), camera, Arc::default());
        drive(&mut session, Message::RequestCameraAccess);

        drive(&mut session, Message::CapturePhoto);
        drive(&mut session, Message::CapturePhoto);

        assert_eq!(session.state().last_error(), None);
        assert_eq!(session.state().captured_photo(), Some(&photo("file://y.jpg")));
    }

    #[test]
    fn test_second_capture_while_pending_is_ignored() {
        let camera = Arc::new(StubCamera::with_results(vec![Ok(photo("file://x.jpg"))]));
        let mut session = session(granting(), camera, Arc::default());
        drive(&mut session, Message::RequestCameraAccess);

        let first = session.update(Message::CapturePhoto);
        let second = session.update(Message::CapturePhoto);

        assert_eq!(first.len(), 1);
        assert!(second.is_none());
    }

    #[test]
    fn test_capture_outside_live_is_ignored() {
        let mut session = session(granting(), Arc::default(), Arc::default());
        assert!(session.update(Message::CapturePhoto).is_none());
        assert_eq!(session.state().status_message(), "");
    }

    #[test]
    fn test_cancel_returns_to_browsing_and_releases() {
        let camera = Arc::new(StubCamera::default());
        let mut session = session(granting(), Arc::clone(&camera), Arc::default());
        drive(&mut session, Message::RequestCameraAccess);
        assert_eq!(camera.open_count(), 1);

        drive(&mut session, Message::CancelLiveCapture);

        assert_eq!(session.state().mode_kind(), ModeKind::Browsing);
        assert_eq!(session.state().status_message(), "");
        assert_eq!(camera.open_count(), 0);
    }

    #[test]
    fn test_dropping_live_session_releases_viewfinder() {
        let camera = Arc::new(StubCamera::default());
        let mut session = session(granting(), Arc::clone(&camera), Arc::default());
        drive(&mut session, Message::RequestCameraAccess);
        assert_eq!(camera.open_count(), 1);

        drop(session);

        assert_eq!(camera.open_count(), 0);
    }

    #[test]
    fn test_cancel_from_browsing_is_noop() {
        let mut session = session(granting(), Arc::default(), Arc::default());
        let before = session.state().snapshot();

        assert!(session.update(Message::CancelLiveCapture).is_none());
        assert_eq!(session.state().snapshot(), before);
    }

    #[test]
    fn test_result_after_cancel_is_discarded() {
        let camera = Arc::new(StubCamera::with_results(vec![Ok(photo("file://late.jpg"))]));
        let mut session = session(granting(), camera, Arc::default());
        drive(&mut session, Message::RequestCameraAccess);

        let pending = session.update(Message::CapturePhoto);
        drive(&mut session, Message::CancelLiveCapture);
        for message in resolve(pending) {
            drive(&mut session, message);
        }

        assert_eq!(session.state().mode_kind(), ModeKind::Browsing);
        assert!(session.state().captured_photo().is_none());
        assert!(!session.state().label_prompt_visible());
    }
}
