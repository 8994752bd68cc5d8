// SPDX-License-Identifier: GPL-3.0-only

//! Cooperative session driver
//!
//! The session is mutated only on the thread that owns the runtime. Task
//! futures run on tokio and report back through a channel; each reported
//! message is applied as one `update` call, so the presentation never sees a
//! half-applied resolution.

use crate::app::CaptureSession;
use crate::app::state::{Message, SessionState};
use crate::errors::{AppError, AppResult};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::debug;

pub struct SessionRuntime {
    session: CaptureSession,
    handle: Handle,
    sender: mpsc::UnboundedSender<Message>,
    receiver: mpsc::UnboundedReceiver<Message>,
    in_flight: usize,
}

impl SessionRuntime {
    pub fn new(session: CaptureSession, handle: Handle) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            session,
            handle,
            sender,
            receiver,
            in_flight: 0,
        }
    }

    /// Build on the tokio runtime of the calling context
    pub fn current(session: CaptureSession) -> AppResult<Self> {
        let handle = Handle::try_current()
            .map_err(|e| AppError::Other(format!("no tokio runtime: {}", e)))?;
        Ok(Self::new(session, handle))
    }

    pub fn state(&self) -> &SessionState {
        self.session.state()
    }

    /// Number of task futures that have not reported back yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Apply a message now and start its follow-up work
    pub fn dispatch(&mut self, message: impl Into<Message>) {
        let task = self.session.update(message.into());
        for future in task.into_futures() {
            self.in_flight += 1;
            let sender = self.sender.clone();
            self.handle.spawn(async move {
                let message = future.await;
                // The receiver lives as long as the runtime; a failed send
                // only happens while shutting down
                let _ = sender.send(message);
            });
        }
    }

    /// Apply every result that has already arrived, without waiting
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(message) = self.receiver.try_recv() {
            self.apply_result(message);
            applied += 1;
        }
        applied
    }

    /// Wait for the next result and apply it
    ///
    /// Returns false when nothing is in flight.
    pub async fn next(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.receiver.recv().await {
            Some(message) => {
                self.apply_result(message);
                true
            }
            None => false,
        }
    }

    /// Apply results until no work is left in flight
    pub async fn settle(&mut self) {
        while self.next().await {}
    }

    fn apply_result(&mut self, message: Message) {
        self.in_flight = self.in_flight.saturating_sub(1);
        debug!(message = ?message, in_flight = self.in_flight, "Applying task result");
        self.dispatch(message);
    }
}

impl std::fmt::Debug for SessionRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRuntime")
            .field("session", &self.session)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}
