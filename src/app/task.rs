// SPDX-License-Identifier: GPL-3.0-only

//! Deferred work returned by the update function
//!
//! A [`Task`] holds futures, each resolving to one [`Message`] that is fed
//! back into the session. The session never awaits anything itself.

use crate::app::state::Message;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

#[must_use = "tasks do nothing unless handed to a runtime"]
pub struct Task {
    futures: Vec<BoxFuture<'static, Message>>,
}

impl Task {
    /// No follow-up work
    pub fn none() -> Self {
        Self {
            futures: Vec::new(),
        }
    }

    /// Run `future` and map its output to a message
    ///
    /// A panic inside `future` still resolves the task: `recover` turns the
    /// panic reason into the message, so the session always hears back.
    pub fn perform<T, F, M, R>(future: F, map: M, recover: R) -> Self
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
        M: FnOnce(T) -> Message + Send + 'static,
        R: FnOnce(String) -> Message + Send + 'static,
    {
        let future = AssertUnwindSafe(future)
            .catch_unwind()
            .map(move |outcome| match outcome {
                Ok(output) => map(output),
                Err(panic) => recover(panic_reason(panic.as_ref())),
            });
        Self {
            futures: vec![future.boxed()],
        }
    }

    pub fn is_none(&self) -> bool {
        self.futures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.futures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.futures.is_empty()
    }

    pub fn into_futures(self) -> Vec<BoxFuture<'static, Message>> {
        self.futures
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task({} pending)", self.futures.len())
    }
}

fn panic_reason(panic: &(dyn Any + Send)) -> String {
    if let Some(reason) = panic.downcast_ref::<&str>() {
        reason.to_string()
    } else if let Some(reason) = panic.downcast_ref::<String>() {
        reason.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perform_maps_output() {
        let task = Task::perform(
            async { "x".to_string() },
            Message::SubmitLabel,
            |_| Message::DismissLabelPrompt,
        );
        assert_eq!(task.len(), 1);
        let mut futures = task.into_futures();
        let message = futures::executor::block_on(futures.remove(0));
        assert!(matches!(message, Message::SubmitLabel(text) if text == "x"));
    }

    #[test]
    fn test_panicking_future_still_reports() {
        let task = Task::perform(
            async {
                if true {
                    panic!("driver crashed");
                }
                String::new()
            },
            Message::SubmitLabel,
            |reason| Message::SubmitLabel(format!("recovered: {}", reason)),
        );
        let mut futures = task.into_futures();
        let message = futures::executor::block_on(futures.remove(0));
        assert!(matches!(message, Message::SubmitLabel(text) if text == "recovered: driver crashed"));
    }

    #[test]
    fn test_none_is_empty() {
        assert!(Task::none().is_none());
        assert_eq!(Task::none().len(), 0);
    }
}
