// SPDX-License-Identifier: GPL-3.0-only

//! Modal alert channel
//!
//! Alerts are blocking notifications the presentation must acknowledge. They
//! are separate from the inline error text kept in the session state.

use crate::constants;
use crate::errors::ValidationError;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

impl From<ValidationError> for Alert {
    fn from(err: ValidationError) -> Self {
        Alert::new(constants::VALIDATION_ALERT_TITLE, err.to_string())
    }
}

/// Sink for modal alerts
pub trait AlertChannel: Send + Sync {
    fn alert(&self, alert: Alert);
}

impl AlertChannel for tokio::sync::mpsc::UnboundedSender<Alert> {
    fn alert(&self, alert: Alert) {
        if self.send(alert).is_err() {
            warn!("Alert receiver dropped");
        }
    }
}

/// Alert channel that only logs, for headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAlerts;

impl AlertChannel for LogAlerts {
    fn alert(&self, alert: Alert) {
        warn!(title = %alert.title, message = %alert.message, "Alert");
    }
}
