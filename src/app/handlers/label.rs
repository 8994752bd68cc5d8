// SPDX-License-Identifier: GPL-3.0-only

//! Naming dialog handlers

use crate::app::CaptureSession;
use crate::app::alert::Alert;
use crate::app::task::Task;
use crate::errors::ValidationError;
use tracing::{debug, info, warn};

/// Reject names that are blank after trimming
pub fn validate_label(candidate: &str) -> Result<(), ValidationError> {
    if candidate.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}

impl CaptureSession {
    /// Save `candidate` as the subject name and close the naming dialog
    ///
    /// The text is stored as entered; only the emptiness check trims it.
    /// On rejection nothing changes. A valid name with no photo on screen
    /// is ignored.
    pub fn submit_label(&mut self, candidate: &str) -> Result<(), ValidationError> {
        validate_label(candidate)?;
        if self.state.captured_photo().is_none() {
            debug!(name = %candidate, "No photo to name, ignoring");
            return Ok(());
        }
        self.state.subject_name = candidate.to_string();
        self.state.close_label_prompt();
        info!(name = %candidate, "Subject name saved");
        Ok(())
    }

    pub(crate) fn handle_submit_label(&mut self, candidate: String) -> Task {
        if let Err(e) = self.submit_label(&candidate) {
            warn!(error = %e, "Rejected subject name");
            self.alerts.alert(Alert::from(e));
        }
        Task::none()
    }

    pub(crate) fn handle_dismiss_label_prompt(&mut self) -> Task {
        debug!(
            visible = self.state.label_prompt_visible(),
            "Dismissing label prompt"
        );
        self.state.close_label_prompt();
        Task::none()
    }
}
