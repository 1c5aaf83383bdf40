use std::future::Future;
use std::ops::ControlFlow;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};

/// A repeating background tick, stopped on drop.
///
/// The first tick fires one `period` after `start`. The task ends when the
/// callback returns `ControlFlow::Break`.
#[derive(Debug)]
pub struct Countdown {
    handle: Option<JoinHandle<()>>,
}

impl Countdown {
    /// Spawn the tick loop on the current tokio runtime.
    pub fn start<F, Fut>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ControlFlow<()>> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if on_tick().await.is_break() {
                    break;
                }
            }
        });
        Self {
            handle: Some(handle),
        }
    }

    /// Stop the task before its next tick.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Release the task without aborting it.
    ///
    /// Used from inside the tick callback, where aborting would cut the
    /// callback short.
    pub fn disarm(&mut self) {
        self.handle = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn ticks_until_break() {
        let count = Arc::new(AtomicU32::new(0));
        let seen = Arc::clone(&count);
        let countdown = Countdown::start(Duration::from_secs(1), move || {
            let seen = Arc::clone(&seen);
            async move {
                if seen.fetch_add(1, Ordering::SeqCst) + 1 >= 3 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            }
        });

        tokio::time::sleep(Duration::from_millis(10_500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert!(countdown.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_ticks() {
        let count = Arc::new(AtomicU32::new(0));
        let seen = Arc::clone(&count);
        let mut countdown = Countdown::start(Duration::from_secs(1), move || {
            let seen = Arc::clone(&seen);
            async move {
                seen.fetch_add(1, Ordering::SeqCst);
                ControlFlow::Continue(())
            }
        });

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        countdown.cancel();
        let after_cancel = count.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(after_cancel, 2);
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert!(!countdown.is_armed());
    }
}
