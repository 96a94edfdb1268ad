//! Run-scoped cancellation signal
//!
//! Each run carries one cancellation signal. Observing it stops new
//! downloads from being issued; in-flight work completes or aborts, and
//! reconciliation still runs before the job reports a cancelled status.

use crate::domain::{FigsyncError, Result};
use tokio::sync::watch;

/// Cloneable handle to a run's cancellation channel
///
/// Wraps a watch receiver seeded with `false`. Once the paired sender flips
/// it to `true` the signal stays triggered for the rest of the run.
///
/// # Examples
///
/// ```
/// use figsync::core::sync::signal::ShutdownSignal;
/// use tokio::sync::watch;
///
/// let (tx, rx) = watch::channel(false);
/// let signal = ShutdownSignal::new(rx);
///
/// assert!(!signal.is_triggered());
/// tx.send(true).ok();
/// assert!(signal.is_triggered());
/// ```
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    receiver: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Wrap a watch receiver as a cancellation signal
    pub fn new(receiver: watch::Receiver<bool>) -> Self {
        Self { receiver }
    }

    /// A signal that never triggers
    ///
    /// The paired sender is dropped immediately; the receiver keeps
    /// reporting the initial `false` forever.
    pub fn none() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self::new(rx)
    }

    /// Check whether cancellation has been requested
    pub fn is_triggered(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Return an error if cancellation has been requested
    ///
    /// The returned [`FigsyncError::Cancelled`] is a control-flow marker:
    /// callers map it to a cancelled terminal status, not a failure.
    pub fn check(&self) -> Result<()> {
        if self.is_triggered() {
            return Err(FigsyncError::Cancelled);
        }
        Ok(())
    }

    /// Wait until cancellation is requested
    ///
    /// Never resolves if the sender is dropped without triggering.
    pub async fn triggered(&self) {
        let mut receiver = self.receiver.clone();
        loop {
            if *receiver.borrow() {
                return;
            }
            if receiver.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_signal_starts_untriggered() {
        let (_tx, rx) = watch::channel(false);
        let signal = ShutdownSignal::new(rx);

        assert!(!signal.is_triggered());
        assert!(signal.check().is_ok());
    }

    #[test]
    fn test_signal_triggers_on_send() {
        let (tx, rx) = watch::channel(false);
        let signal = ShutdownSignal::new(rx);

        tx.send(true).unwrap();

        assert!(signal.is_triggered());
        assert!(matches!(signal.check(), Err(FigsyncError::Cancelled)));
    }

    #[test]
    fn test_clones_share_the_trigger() {
        let (tx, rx) = watch::channel(false);
        let signal = ShutdownSignal::new(rx);
        let clone = signal.clone();

        tx.send(true).unwrap();

        assert!(signal.is_triggered());
        assert!(clone.is_triggered());
    }

    #[test]
    fn test_none_never_triggers() {
        let signal = ShutdownSignal::none();

        assert!(!signal.is_triggered());
        assert!(signal.check().is_ok());
    }

    #[tokio::test]
    async fn test_triggered_resolves_after_send() {
        let (tx, rx) = watch::channel(false);
        let signal = ShutdownSignal::new(rx);

        let waiter = tokio::spawn(async move { signal.triggered().await });

        tokio::time::sleep(Duration::from_millis(10)).await;
        tx.send(true).unwrap();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("triggered() did not resolve")
            .unwrap();
    }

    #[tokio::test]
    async fn test_triggered_resolves_immediately_when_already_set() {
        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();
        let signal = ShutdownSignal::new(rx);

        tokio::time::timeout(Duration::from_millis(100), signal.triggered())
            .await
            .expect("triggered() did not resolve");
    }
}
