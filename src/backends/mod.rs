// SPDX-License-Identifier: MPL-2.0

//! Backend abstraction layer for the device subsystems
//!
//! The capture session talks to two device collaborators, both behind traits
//! so a real platform binding and the simulated devices are interchangeable:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               CaptureSession                │
//! └────────────────────┬────────────────────────┘
//!                      │
//! ┌────────────────────┴────────────────────────┐
//! │              Backend Layer                  │
//! │  ┌──────────────────┐  ┌─────────────────┐  │
//! │  │ PermissionBackend│  │  CameraBackend  │  │
//! │  └──────────────────┘  └─────────────────┘  │
//! │          └── simulated ──┘                  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`camera`]: permission and still-capture traits, the scoped viewfinder,
//!   and the simulated device implementation

pub mod camera;
