// SPDX-License-Identifier: MPL-2.0

//! Label Camera - grant camera access, take a still photo, give it a name
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: capture session controller (state, messages, handlers, runtime)
//! - [`backends`]: permission and camera subsystem traits plus simulated devices
//! - [`config`]: configuration of the simulated devices
//! - [`terminal`]: interactive terminal front end
//!
//! # Example
//!
//! ```ignore
//! let session = CaptureSession::new(permission, camera, alerts);
//! let mut runtime = SessionRuntime::current(session)?;
//! runtime.dispatch(Gesture::RequestAccess);
//! runtime.settle().await;
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod terminal;

// Re-export commonly used types
pub use app::{CaptureSession, Gesture, Message, ModeKind, SessionRuntime, SessionSnapshot};
pub use config::Config;
pub use errors::{AppError, AppResult};
