// SPDX-License-Identifier: MPL-2.0

//! End-to-end tests against the simulated devices

use label_camera::app::{CaptureSession, Gesture, LogAlerts, ModeKind, SessionRuntime};
use label_camera::backends::camera::{SimulatedCamera, SimulatedPermission};
use label_camera::config::{CaptureFailure, PermissionBehaviour};
use label_camera::{Config, constants};
use std::path::Path;
use std::sync::Arc;

fn config(dir: &Path) -> Config {
    Config {
        capture_delay_ms: 0,
        photo_width: 32,
        photo_height: 24,
        output_dir: Some(dir.to_path_buf()),
        ..Config::default()
    }
}

fn runtime(config: &Config) -> (SessionRuntime, SimulatedCamera) {
    let camera = SimulatedCamera::new(config);
    let session = CaptureSession::new(
        Arc::new(SimulatedPermission::new(config.permission)),
        Arc::new(camera.clone()),
        Arc::new(LogAlerts),
    );
    (SessionRuntime::current(session).unwrap(), camera)
}

#[tokio::test]
async fn test_capture_and_label_with_simulated_devices() {
    let dir = tempfile::tempdir().unwrap();
    let (mut runtime, camera) = runtime(&config(dir.path()));

    runtime.dispatch(Gesture::RequestAccess);
    runtime.settle().await;
    assert_eq!(camera.open_viewfinders(), 1);

    runtime.dispatch(Gesture::Capture);
    runtime.settle().await;

    let state = runtime.state();
    assert_eq!(state.mode_kind(), ModeKind::Browsing);
    assert!(state.label_prompt_visible());
    let picture = state.captured_photo().unwrap().clone();
    assert_eq!((picture.width, picture.height), (32, 24));
    assert!(picture.uri.starts_with("file://"));
    assert!(picture.file_path().unwrap().exists());
    assert_eq!(camera.open_viewfinders(), 0);

    runtime.dispatch(Gesture::SubmitLabel("Statue".to_string()));
    assert_eq!(runtime.state().subject_name(), "Statue");
    assert!(!runtime.state().label_prompt_visible());
}

#[tokio::test]
async fn test_simulated_denial() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        permission: PermissionBehaviour::Deny,
        ..config(dir.path())
    };
    let (mut runtime, camera) = runtime(&config);

    runtime.dispatch(Gesture::RequestAccess);
    runtime.settle().await;

    assert_eq!(runtime.state().mode_kind(), ModeKind::Browsing);
    assert_eq!(
        runtime.state().last_error(),
        Some(constants::NO_PERMISSION_MESSAGE)
    );
    assert_eq!(camera.open_viewfinders(), 0);
}

#[tokio::test]
async fn test_simulated_fault_then_retry() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        capture_failure: CaptureFailure::EveryNth(2),
        ..config(dir.path())
    };
    let (mut runtime, camera) = runtime(&config);

    // First shot succeeds
    runtime.dispatch(Gesture::RequestAccess);
    runtime.settle().await;
    runtime.dispatch(Gesture::Capture);
    runtime.settle().await;
    let first = runtime.state().captured_photo().unwrap().clone();

    // Second shot hits the sensor fault and stays on the viewfinder
    runtime.dispatch(Gesture::RequestAccess);
    runtime.settle().await;
    runtime.dispatch(Gesture::Capture);
    runtime.settle().await;
    assert_eq!(runtime.state().mode_kind(), ModeKind::LiveCapture);
    assert_eq!(
        runtime.state().last_error(),
        Some(constants::CAPTURE_FAILED_MESSAGE)
    );
    assert_eq!(runtime.state().status_message(), "");
    assert_eq!(camera.open_viewfinders(), 1);

    // Retrying on the same viewfinder succeeds
    runtime.dispatch(Gesture::Capture);
    runtime.settle().await;
    let state = runtime.state();
    assert_eq!(state.mode_kind(), ModeKind::Browsing);
    assert_eq!(state.last_error(), None);
    assert!(state.label_prompt_visible());
    assert_ne!(state.captured_photo(), Some(&first));
    assert_eq!(camera.open_viewfinders(), 0);
}
