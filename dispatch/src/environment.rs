//! Dispatch reducer dependencies.
//!
//! Ids, ETAs and timestamps are all injected so reducer tests can pin them.

use crate::config::DispatchConfig;
use crate::types::{RequestId, RequestKind};
use medify_core::environment::{Clock, SystemClock};
use rand::Rng;
use std::ops::Range;
use std::sync::{Arc, LazyLock};
use std::sync::atomic::{AtomicU32, Ordering};

/// Source of request ids.
pub trait IdGenerator: Send + Sync {
    /// Allocate the next id for `kind`.
    fn next_id(&self, kind: RequestKind) -> RequestId;
}

/// Process-wide sequence shared by every [`SequentialIds::process`] source.
static PROCESS_SEQUENCE: LazyLock<AtomicU32> =
    LazyLock::new(|| AtomicU32::new(sequence_seed(&SystemClock)));

/// Starting point of a sequence: the clock's milliseconds mod one million.
#[must_use]
pub fn sequence_seed(clock: &dyn Clock) -> u32 {
    let millis = clock.now().timestamp_millis().rem_euclid(1_000_000);
    u32::try_from(millis).unwrap_or_default()
}

#[derive(Debug)]
enum Sequence {
    Process,
    Local(AtomicU32),
}

/// Monotonic id source.
///
/// Production sources all draw from one process-wide counter, seeded once
/// from the system clock and shared across kinds. Ids are unique for the
/// first million allocations of the process, however many trackers exist.
#[derive(Debug)]
pub struct SequentialIds {
    sequence: Sequence,
}

impl SequentialIds {
    /// Draw from the process-wide sequence.
    #[must_use]
    pub const fn process() -> Self {
        Self {
            sequence: Sequence::Process,
        }
    }

    /// A private sequence starting at `first`, for tests that pin ids.
    #[must_use]
    pub const fn starting_at(first: u32) -> Self {
        Self {
            sequence: Sequence::Local(AtomicU32::new(first)),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self, kind: RequestKind) -> RequestId {
        let counter = match &self.sequence {
            Sequence::Process => &*PROCESS_SEQUENCE,
            Sequence::Local(counter) => counter,
        };
        RequestId::new(kind, counter.fetch_add(1, Ordering::Relaxed))
    }
}

/// Source of delivery ETAs.
pub trait EtaEstimator: Send + Sync {
    /// Estimated flight time in minutes.
    fn estimate_minutes(&self) -> u32;
}

/// Uniformly random ETA within a range.
#[derive(Debug, Clone)]
pub struct RandomEta {
    range: Range<u32>,
}

impl RandomEta {
    /// ETAs drawn from `range` (end exclusive).
    #[must_use]
    pub const fn new(range: Range<u32>) -> Self {
        Self { range }
    }
}

impl EtaEstimator for RandomEta {
    fn estimate_minutes(&self) -> u32 {
        if self.range.is_empty() {
            return self.range.start;
        }
        rand::thread_rng().gen_range(self.range.clone())
    }
}

/// Always the same ETA.
#[derive(Debug, Clone, Copy)]
pub struct FixedEta(pub u32);

impl EtaEstimator for FixedEta {
    fn estimate_minutes(&self) -> u32 {
        self.0
    }
}

/// Dependencies of the dispatch reducer.
#[derive(Clone)]
pub struct DispatchEnvironment {
    /// Clock for submission timestamps
    pub clock: Arc<dyn Clock>,
    /// Request id source
    pub ids: Arc<dyn IdGenerator>,
    /// Delivery ETA source
    pub eta: Arc<dyn EtaEstimator>,
    /// Timings
    pub config: DispatchConfig,
}

impl DispatchEnvironment {
    /// Production environment: ids from the process-wide sequence and random
    /// ETAs from the configured range.
    #[must_use]
    pub fn new(config: DispatchConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            ids: Arc::new(SequentialIds::process()),
            eta: Arc::new(RandomEta::new(config.eta_minutes.clone())),
            clock,
            config,
        }
    }

    /// Replace the id source.
    #[must_use]
    pub fn with_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    /// Replace the ETA source.
    #[must_use]
    pub fn with_eta(mut self, eta: impl EtaEstimator + 'static) -> Self {
        self.eta = Arc::new(eta);
        self
    }
}
