//! # Medify Testing
//!
//! Testing utilities and helpers for the Medify reducer architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A Given-When-Then harness for reducers
//! - Assertion helpers for effects
//! - Virtual-time helpers for timer-driven transitions
//!
//! ## Example
//!
//! ```ignore
//! use medify_testing::{advance_by, test_clock};
//!
//! #[tokio::test(start_paused = true)]
//! async fn delivery_completes() {
//!     let tracker = logged_in_tracker(test_clock()).await;
//!     tracker.submit_delivery(form).await?;
//!     let _handle = tracker.begin_transit().await?;
//!     advance_by(Duration::from_secs(5)).await;
//!     assert_eq!(tracker.delivery().await.map(|d| d.status), Some(DeliveryStatus::Delivered));
//! }
//! ```

use chrono::{DateTime, Utc};
use medify_core::environment::Clock;
use std::time::Duration;


/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use medify_testing::mocks::FixedClock;
    /// use medify_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::days(20_089))
    }
}

/// Advance paused tokio time and let woken timer tasks run.
///
/// Meant for `#[tokio::test(start_paused = true)]`. Yields before advancing
/// so freshly spawned timer tasks register their sleeps, then yields again
/// so the tasks woken by the advance can feed their actions back.
pub async fn advance_by(duration: Duration) {
    settle().await;
    tokio::time::advance(duration).await;
    settle().await;
}

/// Yield to the scheduler a few times so ready tasks make progress.
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

/// Install a test tracing subscriber writing through the test harness.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "medify=debug".into()),
        )
        .try_init();
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
        assert_eq!(time1.to_rfc3339(), "2025-01-01T00:00:00+00:00");
    }

    #[tokio::test(start_paused = true)]
    async fn test_advance_by_fires_sleeping_task() {
        let task = tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            42
        });

        advance_by(Duration::from_secs(5)).await;
        assert!(task.is_finished());
        assert_eq!(task.await.ok(), Some(42));
    }
}
