//! Triage reducer dependencies.

use crate::rules::RuleTable;
use medify_core::environment::Clock;
use std::sync::Arc;

/// Dependencies of the triage reducer.
#[derive(Clone)]
pub struct TriageEnvironment {
    /// Rule table to evaluate against
    pub rules: Arc<RuleTable>,
    /// Clock for assessment timestamps
    pub clock: Arc<dyn Clock>,
}

impl TriageEnvironment {
    /// Environment using the standard rule table.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_rules(RuleTable::standard(), clock)
    }

    /// Environment with a custom rule table.
    #[must_use]
    pub fn with_rules(rules: RuleTable, clock: Arc<dyn Clock>) -> Self {
        Self {
            rules: Arc::new(rules),
            clock,
        }
    }
}
