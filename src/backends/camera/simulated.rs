// SPDX-License-Identifier: GPL-3.0-only

//! Simulated permission and camera subsystems
//!
//! Stand-ins for the device services, driven by [`Config`]. Stills are
//! rendered as a gradient and written as JPEG into a scratch directory.

use super::types::{
    BackendError, BackendResult, CapturedPicture, PermissionResponse, ViewfinderId,
};
use super::viewfinder::Viewfinder;
use super::{CameraBackend, PermissionBackend};
use crate::config::{CaptureFailure, Config, PermissionBehaviour};
use crate::errors::{CaptureError, PermissionError};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Permission subsystem answering per [`PermissionBehaviour`]
#[derive(Debug)]
pub struct SimulatedPermission {
    behaviour: PermissionBehaviour,
    requests: AtomicU32,
}

impl SimulatedPermission {
    pub fn new(behaviour: PermissionBehaviour) -> Self {
        Self {
            behaviour,
            requests: AtomicU32::new(0),
        }
    }

    /// Number of requests answered so far
    pub fn requests(&self) -> u32 {
        self.requests.load(Ordering::SeqCst)
    }

    fn answer(&self, request: u32) -> Result<PermissionResponse, PermissionError> {
        match self.behaviour {
            PermissionBehaviour::Grant => Ok(PermissionResponse::granted()),
            PermissionBehaviour::Deny => Ok(PermissionResponse::denied(false)),
            PermissionBehaviour::Fail => Err(PermissionError::RequestFailed(
                "permission service unavailable".to_string(),
            )),
            PermissionBehaviour::GrantAfterDenials(n) if request > n => {
                Ok(PermissionResponse::granted())
            }
            PermissionBehaviour::GrantAfterDenials(_) => Ok(PermissionResponse::denied(true)),
        }
    }
}

impl PermissionBackend for SimulatedPermission {
    fn request_access(&self) -> BoxFuture<'static, Result<PermissionResponse, PermissionError>> {
        let request = self.requests.fetch_add(1, Ordering::SeqCst) + 1;
        let answer = self.answer(request);
        debug!(request, answer = ?answer, "Simulated permission request");
        async move {
            // Yield once so the answer arrives asynchronously
            tokio::task::yield_now().await;
            answer
        }
        .boxed()
    }
}

struct CameraInner {
    delay: Duration,
    failure: CaptureFailure,
    width: u32,
    height: u32,
    output_dir: PathBuf,
    active: Mutex<HashSet<ViewfinderId>>,
    captures: AtomicU32,
}

impl CameraInner {
    fn is_active(&self, viewfinder: ViewfinderId) -> bool {
        self.active
            .lock()
            .map(|active| active.contains(&viewfinder))
            .unwrap_or(false)
    }
}

/// Camera subsystem producing generated stills
#[derive(Clone)]
pub struct SimulatedCamera {
    inner: Arc<CameraInner>,
}

impl SimulatedCamera {
    pub fn new(config: &Config) -> Self {
        Self {
            inner: Arc::new(CameraInner {
                delay: Duration::from_millis(config.capture_delay_ms),
                failure: config.capture_failure,
                width: config.photo_width,
                height: config.photo_height,
                output_dir: config.output_dir(),
                active: Mutex::new(HashSet::new()),
                captures: AtomicU32::new(0),
            }),
        }
    }

    /// Number of viewfinders currently open
    pub fn open_viewfinders(&self) -> usize {
        self.inner
            .active
            .lock()
            .map(|active| active.len())
            .unwrap_or(0)
    }
}

impl std::fmt::Debug for SimulatedCamera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedCamera")
            .field("width", &self.inner.width)
            .field("height", &self.inner.height)
            .field("output_dir", &self.inner.output_dir)
            .finish()
    }
}

impl CameraBackend for SimulatedCamera {
    fn open_viewfinder(&self) -> BackendResult<Viewfinder> {
        let id = ViewfinderId::new();
        let mut active = self
            .inner
            .active
            .lock()
            .map_err(|_| BackendError::Other("viewfinder registry poisoned".to_string()))?;
        if !active.is_empty() {
            return Err(BackendError::Busy);
        }
        active.insert(id);
        info!(viewfinder = %id, "Viewfinder opened");

        let inner = Arc::clone(&self.inner);
        Ok(Viewfinder::new(id, move |id| {
            if let Ok(mut active) = inner.active.lock() {
                active.remove(&id);
            }
        }))
    }

    fn capture(
        &self,
        viewfinder: ViewfinderId,
    ) -> BoxFuture<'static, Result<CapturedPicture, CaptureError>> {
        let inner = Arc::clone(&self.inner);
        async move {
            if !inner.is_active(viewfinder) {
                return Err(CaptureError::Released);
            }
            tokio::time::sleep(inner.delay).await;
            if !inner.is_active(viewfinder) {
                return Err(CaptureError::Released);
            }

            let sequence = inner.captures.fetch_add(1, Ordering::SeqCst) + 1;
            if inner.failure.fails(sequence) {
                warn!(sequence, "Simulated sensor fault");
                return Err(CaptureError::Hardware("simulated sensor fault".to_string()));
            }

            let (width, height) = (inner.width, inner.height);
            let output_dir = inner.output_dir.clone();
            let path = tokio::task::spawn_blocking(move || {
                write_still(&output_dir, width, height, sequence)
            })
            .await
            .map_err(|e| CaptureError::Encoding(e.to_string()))??;

            info!(path = %path.display(), width, height, "Simulated still written");
            Ok(CapturedPicture::new(
                format!("file://{}", path.display()),
                width,
                height,
            ))
        }
        .boxed()
    }
}

/// Render a gradient still and save it as JPEG
fn write_still(
    output_dir: &Path,
    width: u32,
    height: u32,
    sequence: u32,
) -> Result<PathBuf, CaptureError> {
    std::fs::create_dir_all(output_dir)?;

    // Shift the hue per shot so consecutive stills are distinguishable
    let shift = (sequence.wrapping_mul(47) % 256) as u8;
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        let r = ((x * 255) / width.max(1)) as u8;
        let g = ((y * 255) / height.max(1)) as u8;
        image::Rgb([r.wrapping_add(shift), g, 255u8.wrapping_sub(shift)])
    });

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S_%3f");
    let filepath = output_dir.join(format!("IMG_{}_{}.jpg", timestamp, sequence));
    img.save(&filepath)?;
    Ok(filepath)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(dir: &Path) -> Config {
        Config {
            capture_delay_ms: 0,
            photo_width: 8,
            photo_height: 6,
            output_dir: Some(dir.to_path_buf()),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_grant_after_denials() {
        let permission = SimulatedPermission::new(PermissionBehaviour::GrantAfterDenials(2));
        assert!(!permission.request_access().await.unwrap().granted);
        assert!(!permission.request_access().await.unwrap().granted);
        assert!(permission.request_access().await.unwrap().granted);
        assert_eq!(permission.requests(), 3);
    }

    #[tokio::test]
    async fn test_capture_writes_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let camera = SimulatedCamera::new(&test_config(dir.path()));
        let viewfinder = camera.open_viewfinder().unwrap();

        let picture = camera.capture(viewfinder.id()).await.unwrap();
        assert_eq!((picture.width, picture.height), (8, 6));
        let path = picture.file_path().unwrap();
        assert!(path.exists());
        assert_eq!(image::open(&path).unwrap().width(), 8);
    }

    #[tokio::test]
    async fn test_capture_after_release_fails() {
        let dir = tempfile::tempdir().unwrap();
        let camera = SimulatedCamera::new(&test_config(dir.path()));
        let viewfinder = camera.open_viewfinder().unwrap();
        let id = viewfinder.id();
        drop(viewfinder);

        assert_eq!(camera.open_viewfinders(), 0);
        assert_eq!(camera.capture(id).await, Err(CaptureError::Released));
    }

    #[test]
    fn test_single_viewfinder_at_a_time() {
        let dir = tempfile::tempdir().unwrap();
        let camera = SimulatedCamera::new(&test_config(dir.path()));
        let _first = camera.open_viewfinder().unwrap();
        assert_eq!(camera.open_viewfinder().unwrap_err(), BackendError::Busy);
    }
}
