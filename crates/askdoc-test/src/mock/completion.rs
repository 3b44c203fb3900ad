//! Manually released completion source for testing.

use std::sync::{Arc, Mutex};

use askdoc_core::completion::CompletionSource;
use askdoc_core::{Error, Result};
use tokio::sync::Notify;
use uuid::Uuid;

/// Completion source released explicitly from the test body.
///
/// `wait_ready` blocks until the test calls [`complete`](Self::complete) or
/// [`fail`](Self::fail), which puts readiness timing under test control.
/// One call releases one waiter; a release issued before the wait starts is
/// not lost.
#[derive(Clone, Debug, Default)]
pub struct ManualCompletion {
    inner: Arc<ManualInner>,
}

#[derive(Debug, Default)]
struct ManualInner {
    notify: Notify,
    fail_next: Mutex<bool>,
}

impl ManualCompletion {
    /// Creates a new manual completion source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Releases one pending `wait_ready` with success.
    pub fn complete(&self) {
        self.inner.notify.notify_one();
    }

    /// Releases one pending `wait_ready` with a failure.
    pub fn fail(&self) {
        *self
            .inner
            .fail_next
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = true;
        self.inner.notify.notify_one();
    }
}

#[async_trait::async_trait]
impl CompletionSource for ManualCompletion {
    async fn wait_ready(&self, _request_id: Uuid) -> Result<()> {
        self.inner.notify.notified().await;

        let mut fail_next = self
            .inner
            .fail_next
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        if *fail_next {
            *fail_next = false;
            return Err(Error::unknown().with_message("mock processing failure"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_release_before_wait_is_not_lost() {
        let completion = ManualCompletion::new();
        completion.complete();
        completion.wait_ready(Uuid::now_v7()).await.unwrap();
    }

    #[tokio::test]
    async fn test_fail_releases_with_error() {
        let completion = ManualCompletion::new();
        completion.fail();
        assert!(completion.wait_ready(Uuid::now_v7()).await.is_err());
    }
}
