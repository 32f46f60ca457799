//! Dispatch configuration.
//!
//! Timings and the ETA range are provided by the application; the defaults
//! match the demo behavior.

use std::ops::Range;
use std::time::Duration;

/// Settings for the request lifecycle tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Time from `begin_transit` to automatic delivery.
    ///
    /// Default: 5 seconds
    pub transit_delay: Duration,

    /// Time from emergency submission to acknowledgement.
    ///
    /// Default: zero (acknowledged on the next scheduler tick)
    pub emergency_ack_delay: Duration,

    /// Delivery ETA range in minutes, end exclusive.
    ///
    /// Default: `20..35`
    pub eta_minutes: Range<u32>,
}

impl DispatchConfig {
    /// Set the transit delay.
    #[must_use]
    pub const fn with_transit_delay(mut self, delay: Duration) -> Self {
        self.transit_delay = delay;
        self
    }

    /// Set the emergency acknowledgement delay.
    #[must_use]
    pub const fn with_emergency_ack_delay(mut self, delay: Duration) -> Self {
        self.emergency_ack_delay = delay;
        self
    }

    /// Set the ETA range (minutes, end exclusive).
    #[must_use]
    pub fn with_eta_minutes(mut self, range: Range<u32>) -> Self {
        self.eta_minutes = range;
        self
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            transit_delay: Duration::from_secs(5),
            emergency_ack_delay: Duration::ZERO,
            eta_minutes: 20..35,
        }
    }
}
