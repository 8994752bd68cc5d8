// SPDX-License-Identifier: GPL-3.0-only

//! Headless gesture scripts
//!
//! Plays gestures against the simulated devices, waiting for each one's
//! asynchronous work to resolve before the next, and prints the session
//! snapshot as JSON.

use label_camera::app::{Alert, CaptureSession, Gesture, SessionRuntime};
use label_camera::backends::camera::{SimulatedCamera, SimulatedPermission};
use label_camera::{AppError, Config};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

/// Parse one script step
pub fn parse_step(step: &str) -> Result<Gesture, AppError> {
    if let Some(name) = step.strip_prefix("label=") {
        return Ok(Gesture::SubmitLabel(name.to_string()));
    }
    match step {
        "access" => Ok(Gesture::RequestAccess),
        "capture" => Ok(Gesture::Capture),
        "cancel" => Ok(Gesture::CancelLiveView),
        "dismiss" => Ok(Gesture::DismissLabelPrompt),
        other => Err(AppError::Other(format!(
            "unknown step '{}' (expected access, capture, cancel, dismiss, label=<name>)",
            other
        ))),
    }
}

pub fn run_script(
    config: &Config,
    steps: &[String],
    trace: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let gestures = steps
        .iter()
        .map(|step| parse_step(step))
        .collect::<Result<Vec<_>, _>>()?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let (alert_sender, mut alert_receiver) = mpsc::unbounded_channel::<Alert>();
        let session = CaptureSession::new(
            Arc::new(SimulatedPermission::new(config.permission)),
            Arc::new(SimulatedCamera::new(config)),
            Arc::new(alert_sender),
        );
        let mut runtime = SessionRuntime::current(session)?;

        for (index, gesture) in gestures.into_iter().enumerate() {
            info!(step = index + 1, gesture = ?gesture, "Playing gesture");
            runtime.dispatch(gesture);
            runtime.settle().await;

            while let Ok(alert) = alert_receiver.try_recv() {
                eprintln!("alert: {}: {}", alert.title, alert.message);
            }
            if trace {
                println!("{}", serde_json::to_string(&runtime.state().snapshot())?);
            }
        }

        if !trace {
            println!(
                "{}",
                serde_json::to_string_pretty(&runtime.state().snapshot())?
            );
        }
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps() {
        assert_eq!(parse_step("access").unwrap(), Gesture::RequestAccess);
        assert_eq!(
            parse_step("label=Old bridge").unwrap(),
            Gesture::SubmitLabel("Old bridge".to_string())
        );
        assert_eq!(
            parse_step("label=").unwrap(),
            Gesture::SubmitLabel(String::new())
        );
        assert!(parse_step("zoom").is_err());
    }
}
