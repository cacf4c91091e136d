//! Waiting out the album host's rate budget.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};
use crate::imgur::AlbumHost;

/// Block until `host` reports at least `threshold` credits.
///
/// Re-checks every `interval`. Returns [`Error::Cancelled`] as soon as `cancel`
/// fires. A failed credit query is logged and treated as "enough credits".
pub async fn wait_for_credits(
    host: &dyn AlbumHost,
    threshold: u32,
    interval: Duration,
    cancel: &CancellationToken,
) -> Result<()> {
    let mut announced = false;

    loop {
        let remaining = match host.remaining_credits().await {
            Ok(remaining) => remaining,
            Err(e) => {
                tracing::warn!("Could not read imgur credits, continuing: {}", e);
                return Ok(());
            }
        };

        if remaining >= i64::from(threshold) {
            if announced {
                tracing::info!("Rate limit replenished ({} credits)", remaining);
            }
            return Ok(());
        }

        if !announced {
            tracing::warn!(
                "Approaching rate limit ({} credits left). Sleeping until reset...",
                remaining
            );
            announced = true;
        } else {
            tracing::debug!("Still {} credits left, waiting {:?}", remaining, interval);
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = cancel.cancelled() => return Err(Error::Cancelled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    /// Reports credits from a script; the last value repeats forever.
    struct ScriptedCredits {
        script: Mutex<Vec<i64>>,
        checks: AtomicUsize,
    }

    impl ScriptedCredits {
        fn new(script: &[i64]) -> Self {
            Self {
                script: Mutex::new(script.iter().rev().copied().collect()),
                checks: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl AlbumHost for ScriptedCredits {
        fn handles(&self, _url: &str) -> bool {
            true
        }

        fn is_album(&self, _url: &str) -> bool {
            false
        }

        async fn remaining_credits(&self) -> Result<i64> {
            self.checks.fetch_add(1, Ordering::SeqCst);
            let mut script = self.script.lock().unwrap();
            if script.len() > 1 {
                Ok(script.pop().unwrap())
            } else {
                Ok(script[0])
            }
        }

        async fn resolve_and_download(&self, _url: &str, _album_title: &str) -> usize {
            0
        }
    }

    #[tokio::test]
    async fn test_returns_immediately_with_enough_credits() {
        let host = ScriptedCredits::new(&[500]);
        let cancel = CancellationToken::new();

        tokio_test::assert_ok!(
            wait_for_credits(&host, 50, Duration::from_secs(3600), &cancel).await
        );
        assert_eq!(host.checks.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_waits_until_replenished() {
        let host = ScriptedCredits::new(&[10, 10, 60]);
        let cancel = CancellationToken::new();

        tokio_test::assert_ok!(
            wait_for_credits(&host, 50, Duration::from_millis(5), &cancel).await
        );
        assert_eq!(host.checks.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_cancel_interrupts_wait() {
        let host = ScriptedCredits::new(&[10]);
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            wait_for_credits(&host, 50, Duration::from_secs(3600), &cancel),
        )
        .await
        .expect("wait was not cancelled");

        assert!(matches!(result, Err(Error::Cancelled)));
    }
}
