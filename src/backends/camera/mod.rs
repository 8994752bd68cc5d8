// SPDX-License-Identifier: MPL-2.0

//! Camera backend abstraction
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │   CaptureSession    │
//! └──────────┬──────────┘
//!            │
//!     ┌──────┴───────┐
//!     ▼              ▼
//! ┌──────────┐  ┌──────────┐
//! │Permission│  │  Camera  │  ← Common interfaces
//! │ Backend  │  │ Backend  │
//! └────┬─────┘  └────┬─────┘
//!      └──────┬──────┘
//!             ▼
//!       ┌───────────┐
//!       │ Simulated │  ← Concrete implementation
//!       └───────────┘
//! ```

pub mod simulated;
pub mod types;
pub mod viewfinder;

pub use simulated::{SimulatedCamera, SimulatedPermission};
pub use types::*;
pub use viewfinder::Viewfinder;

use crate::errors::{CaptureError, PermissionError};
use futures::future::BoxFuture;

/// Camera permission subsystem
///
/// A request is a one-shot asynchronous call. The session never retries on its
/// own; a new user gesture issues a new request.
pub trait PermissionBackend: Send + Sync {
    /// Ask for camera authorization
    ///
    /// # Returns
    /// * `Ok(PermissionResponse)` - The subsystem answered (granted or not)
    /// * `Err(PermissionError)` - The request could not be completed
    fn request_access(&self) -> BoxFuture<'static, Result<PermissionResponse, PermissionError>>;
}

/// Camera capture subsystem
pub trait CameraBackend: Send + Sync {
    /// Open the live viewfinder
    ///
    /// The returned guard releases the camera when dropped.
    fn open_viewfinder(&self) -> BackendResult<Viewfinder>;

    /// Take a still photo through an open viewfinder
    ///
    /// # Returns
    /// * `Ok(CapturedPicture)` - Handle to the encoded still
    /// * `Err(CaptureError::Released)` - The viewfinder was closed meanwhile
    /// * `Err(CaptureError)` - Hardware, OS or encoding failure
    fn capture(
        &self,
        viewfinder: ViewfinderId,
    ) -> BoxFuture<'static, Result<CapturedPicture, CaptureError>>;
}
