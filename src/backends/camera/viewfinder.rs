// SPDX-License-Identifier: GPL-3.0-only

//! Scoped viewfinder handle
//!
//! A [`Viewfinder`] is the camera resource held while the session is in live
//! capture. Dropping it releases the camera, so every path out of live
//! capture (photo taken, cancelled, session dropped) tears the preview down.

use super::types::ViewfinderId;
use tracing::debug;

type ReleaseFn = Box<dyn FnOnce(ViewfinderId) + Send>;

pub struct Viewfinder {
    id: ViewfinderId,
    release: Option<ReleaseFn>,
}

impl Viewfinder {
    /// Wrap an opened viewfinder; `release` runs exactly once, on drop
    pub fn new(id: ViewfinderId, release: impl FnOnce(ViewfinderId) + Send + 'static) -> Self {
        Self {
            id,
            release: Some(Box::new(release)),
        }
    }

    pub fn id(&self) -> ViewfinderId {
        self.id
    }
}

impl Drop for Viewfinder {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            debug!(viewfinder = %self.id, "Releasing viewfinder");
            release(self.id);
        }
    }
}

impl std::fmt::Debug for Viewfinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Viewfinder({})", self.id)
    }
}
