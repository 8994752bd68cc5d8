// SPDX-License-Identifier: GPL-3.0-only

//! Stub collaborators for handler unit tests

use crate::app::{Alert, AlertChannel, CaptureSession, Message, Task};
use crate::backends::camera::{
    BackendError, BackendResult, CameraBackend, CapturedPicture, PermissionBackend,
    PermissionResponse, Viewfinder, ViewfinderId,
};
use crate::errors::{CaptureError, PermissionError};
use futures::FutureExt;
use futures::future::BoxFuture;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

pub struct StubPermission(pub Result<PermissionResponse, PermissionError>);

impl PermissionBackend for StubPermission {
    fn request_access(&self) -> BoxFuture<'static, Result<PermissionResponse, PermissionError>> {
        futures::future::ready(self.0.clone()).boxed()
    }
}

#[derive(Default)]
pub struct StubCamera {
    pub results: Mutex<Vec<Result<CapturedPicture, CaptureError>>>,
    pub active: Arc<Mutex<HashSet<ViewfinderId>>>,
    pub refuse_open: bool,
}

impl StubCamera {
    pub fn with_results(results: Vec<Result<CapturedPicture, CaptureError>>) -> Self {
        Self {
            results: Mutex::new(results),
            ..Self::default()
        }
    }

    pub fn open_count(&self) -> usize {
        self.active.lock().unwrap().len()
    }
}

impl CameraBackend for StubCamera {
    fn open_viewfinder(&self) -> BackendResult<Viewfinder> {
        if self.refuse_open {
            return Err(BackendError::DeviceNotFound("stub".to_string()));
        }
        let id = ViewfinderId::new();
        self.active.lock().unwrap().insert(id);
        let active = Arc::clone(&self.active);
        Ok(Viewfinder::new(id, move |id| {
            active.lock().unwrap().remove(&id);
        }))
    }

    fn capture(
        &self,
        _viewfinder: ViewfinderId,
    ) -> BoxFuture<'static, Result<CapturedPicture, CaptureError>> {
        let result = self.results.lock().unwrap().remove(0);
        futures::future::ready(result).boxed()
    }
}

#[derive(Default)]
pub struct RecordingAlerts(pub Mutex<Vec<Alert>>);

impl RecordingAlerts {
    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

impl AlertChannel for RecordingAlerts {
    fn alert(&self, alert: Alert) {
        self.0.lock().unwrap().push(alert);
    }
}

pub fn session(
    permission: StubPermission,
    camera: Arc<StubCamera>,
    alerts: Arc<RecordingAlerts>,
) -> CaptureSession {
    CaptureSession::new(Arc::new(permission), camera, alerts)
}

pub fn granting() -> StubPermission {
    StubPermission(Ok(PermissionResponse::granted()))
}

/// Run every future in `task` to completion, collecting the messages
pub fn resolve(task: Task) -> Vec<Message> {
    task.into_futures()
        .into_iter()
        .map(futures::executor::block_on)
        .collect()
}

/// Apply `message` and every follow-up message until nothing is pending
pub fn drive(session: &mut CaptureSession, message: Message) {
    let mut queue = vec![message];
    while let Some(message) = queue.pop() {
        queue.extend(resolve(session.update(message)));
    }
}
