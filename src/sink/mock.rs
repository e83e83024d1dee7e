//! Mock publish sink for testing
//!
//! A configurable sink that can simulate success, failure, and network
//! latency, and records every snapshot it receives. Used by integration
//! tests to verify the publish flow without a real transport. Clones
//! share counters, so a test can keep a handle while the publishing
//! service owns another.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use super::{PublishReceipt, PublishSink};
use crate::error::PublishError;
use crate::types::DraftSnapshot;

#[derive(Debug, Clone)]
pub struct MockSink {
    succeeds: bool,
    error: Option<String>,
    delay: Duration,
    calls: Arc<Mutex<usize>>,
    delivered: Arc<Mutex<Vec<DraftSnapshot>>>,
}

impl MockSink {
    /// A sink that accepts everything immediately.
    pub fn success() -> Self {
        Self {
            succeeds: true,
            error: None,
            delay: Duration::from_millis(0),
            calls: Arc::new(Mutex::new(0)),
            delivered: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A sink that rejects everything with the given error.
    pub fn failure(error: &str) -> Self {
        Self {
            succeeds: false,
            error: Some(error.to_string()),
            ..Self::success()
        }
    }

    /// A sink that accepts after the given delay.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::success()
        }
    }

    /// Number of times `publish` was invoked.
    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    /// Snapshots delivered successfully, in order.
    pub fn delivered(&self) -> Vec<DraftSnapshot> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl PublishSink for MockSink {
    async fn publish(
        &self,
        snapshot: &DraftSnapshot,
    ) -> std::result::Result<PublishReceipt, PublishError> {
        *self.calls.lock().unwrap() += 1;

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        if self.succeeds {
            self.delivered.lock().unwrap().push(snapshot.clone());
            Ok(PublishReceipt {
                post_id: snapshot.post_id.clone(),
                posted_at: chrono::Utc::now().timestamp(),
                platforms: snapshot.platforms.clone(),
            })
        } else {
            let message = self
                .error
                .clone()
                .unwrap_or_else(|| "mock publish failed".to_string());
            Err(PublishError::Sink(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DraftSnapshot;

    fn snapshot() -> DraftSnapshot {
        DraftSnapshot {
            post_id: "post-1".to_string(),
            content: "Hello".to_string(),
            platforms: vec!["facebook".to_string()],
            media: vec![],
            scheduled_at: None,
        }
    }

    #[tokio::test]
    async fn test_mock_success() {
        let sink = MockSink::success();

        let receipt = sink.publish(&snapshot()).await.unwrap();
        assert_eq!(receipt.post_id, "post-1");
        assert_eq!(receipt.platforms, vec!["facebook"]);
        assert!(receipt.posted_at > 1_600_000_000);

        assert_eq!(sink.call_count(), 1);
        let delivered = sink.delivered();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].content, "Hello");
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let sink = MockSink::failure("relay unreachable");

        let result = sink.publish(&snapshot()).await;
        assert_eq!(
            result.unwrap_err(),
            PublishError::Sink("relay unreachable".to_string())
        );

        assert_eq!(sink.call_count(), 1);
        assert!(sink.delivered().is_empty());
    }

    #[tokio::test]
    async fn test_mock_with_delay() {
        let sink = MockSink::with_delay(Duration::from_millis(50));

        let start = std::time::Instant::now();
        sink.publish(&snapshot()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_mock_clones_share_counters() {
        let sink = MockSink::success();
        let observer = sink.clone();

        sink.publish(&snapshot()).await.unwrap();
        assert_eq!(observer.call_count(), 1);
        assert_eq!(observer.delivered().len(), 1);
    }
}
