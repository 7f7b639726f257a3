//! Sleep abstraction for testability.
//!
//! Backoff and polling delays go through a sleeper trait so tests can
//! replace real waiting with no-ops or recorded calls while production
//! code uses the real timers.

use std::time::Duration;

/// Abstraction over non-blocking sleeps.
///
/// Implementations yield control for the given duration, allowing other
/// tasks on the same scheduler to run.
pub trait Sleeper: Send + Sync {
    /// Sleeps for the given duration without blocking the thread.
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;
}

/// Abstraction over blocking sleeps.
///
/// The blocking twin of [`Sleeper`]; the calling thread is held for the
/// duration.
pub trait BlockingSleeper: Send + Sync {
    /// Sleeps for the given duration, blocking the thread.
    fn sleep(&self, duration: Duration);
}

/// Production non-blocking sleeper using `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Production blocking sleeper using `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl BlockingSleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Sleeper that returns immediately, for tests.
///
/// Implements both [`Sleeper`] and [`BlockingSleeper`], so either client
/// variant can be driven through retries without real delays.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantSleeper;

impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: Duration) {}
}

impl BlockingSleeper for InstantSleeper {
    fn sleep(&self, _duration: Duration) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn tokio_sleeper_waits_the_requested_duration() {
        let sleeper = TokioSleeper;
        let before = tokio::time::Instant::now();

        Sleeper::sleep(&sleeper, Duration::from_secs(5)).await;

        assert_eq!(before.elapsed(), Duration::from_secs(5));
    }

    #[tokio::test]
    async fn instant_sleeper_returns_immediately() {
        let sleeper = InstantSleeper;
        let before = Instant::now();

        Sleeper::sleep(&sleeper, Duration::from_secs(60)).await;

        assert!(before.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn instant_sleeper_blocks_for_no_time() {
        let sleeper = InstantSleeper;
        let before = Instant::now();

        BlockingSleeper::sleep(&sleeper, Duration::from_secs(60));

        assert!(before.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn thread_sleeper_blocks_for_the_requested_duration() {
        let sleeper = ThreadSleeper;
        let before = Instant::now();

        BlockingSleeper::sleep(&sleeper, Duration::from_millis(10));

        assert!(before.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn sleepers_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TokioSleeper>();
        assert_send_sync::<ThreadSleeper>();
        assert_send_sync::<InstantSleeper>();
    }
}
