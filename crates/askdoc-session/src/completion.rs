//! Fixed-delay completion source.

use std::time::Duration;

use askdoc_core::Result;
use askdoc_core::completion::CompletionSource;
use uuid::Uuid;

/// Delay after which an accepted upload is declared ready: 2 seconds.
///
/// Matches the delay the product has always shipped with. The backend gives
/// no signal for actual ingestion completion, so this value is a guess, not
/// a measurement.
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(2000);

/// Completion source that resolves after a fixed client-side delay.
///
/// This reproduces the shipped behavior: the document is declared ready
/// [`DEFAULT_PROCESSING_DELAY`] after the ingestion service accepts it,
/// regardless of actual backend progress. A known functional gap — replace
/// with a polling or webhook source once the backend reports completion.
#[derive(Debug, Clone)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    /// Creates a fixed-delay source with the given delay.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Returns the configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(DEFAULT_PROCESSING_DELAY)
    }
}

#[async_trait::async_trait]
impl CompletionSource for FixedDelay {
    async fn wait_ready(&self, _request_id: Uuid) -> Result<()> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_resolves_after_configured_delay() {
        let source = FixedDelay::default();
        let started = tokio::time::Instant::now();

        source.wait_ready(Uuid::now_v7()).await.unwrap();

        assert_eq!(started.elapsed(), DEFAULT_PROCESSING_DELAY);
    }
}
