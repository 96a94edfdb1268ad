//! Bounded-concurrency download limiter
//!
//! One limiter instance is shared by the whole run: every image download,
//! across all batches of all jobs, acquires a slot before issuing its
//! request and releases it when the permit drops.

use crate::domain::{FigsyncError, Result};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Concurrency limiter for image downloads
///
/// Cloning is cheap and shares the underlying slot pool, so clones count
/// against the same limit.
#[derive(Debug, Clone)]
pub struct DownloadLimiter {
    semaphore: Arc<Semaphore>,
    max_concurrent: usize,
}

impl DownloadLimiter {
    /// Create a limiter with the given number of slots
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
            max_concurrent,
        }
    }

    /// Acquire a download slot, waiting until one is free
    ///
    /// The returned permit releases the slot when dropped, so an aborted
    /// download can never leak its slot.
    pub async fn acquire(&self) -> Result<OwnedSemaphorePermit> {
        self.semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| FigsyncError::Other("Download limiter closed".to_string()))
    }

    /// Maximum number of concurrent downloads
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Number of currently free slots
    pub fn available_permits(&self) -> usize {
        self.semaphore.available_permits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_acquire_and_release() {
        let limiter = DownloadLimiter::new(2);
        assert_eq!(limiter.available_permits(), 2);

        let permit = limiter.acquire().await.unwrap();
        assert_eq!(limiter.available_permits(), 1);

        drop(permit);
        assert_eq!(limiter.available_permits(), 2);
    }

    #[tokio::test]
    async fn test_acquire_blocks_at_capacity() {
        let limiter = DownloadLimiter::new(1);
        let held = limiter.acquire().await.unwrap();

        let blocked = tokio::time::timeout(Duration::from_millis(50), limiter.acquire()).await;
        assert!(blocked.is_err(), "acquire should block while at capacity");

        drop(held);
        let granted = tokio::time::timeout(Duration::from_millis(50), limiter.acquire()).await;
        assert!(granted.is_ok(), "acquire should succeed after release");
    }

    #[tokio::test]
    async fn test_clones_share_the_pool() {
        let limiter = DownloadLimiter::new(2);
        let clone = limiter.clone();

        let _first = limiter.acquire().await.unwrap();
        let _second = clone.acquire().await.unwrap();

        assert_eq!(limiter.available_permits(), 0);
        assert_eq!(clone.available_permits(), 0);
    }

    #[test]
    fn test_max_concurrent_is_recorded() {
        let limiter = DownloadLimiter::new(5);
        assert_eq!(limiter.max_concurrent(), 5);
    }
}
