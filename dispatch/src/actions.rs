//! Dispatch actions.

use crate::types::{RequestId, ValidatedDelivery, ValidatedEmergency};
use medify_auth::UserId;

/// Inputs to the dispatch reducer.
///
/// `DeliveryCompleted` and `EmergencyAcknowledged` are produced by timers,
/// never by callers, and carry the id of the request they were scheduled
/// for so a stale timer cannot touch a newer request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchAction {
    // ========== Commands ==========
    /// Accept a delivery, replacing any active one.
    SubmitDelivery {
        /// Requesting user
        user_id: UserId,
        /// The checked form
        delivery: ValidatedDelivery,
    },

    /// Dispatch the confirmed delivery.
    BeginTransit,

    /// Accept an emergency, replacing any active one.
    SubmitEmergency {
        /// Requesting user
        user_id: UserId,
        /// The checked form
        emergency: ValidatedEmergency,
    },

    /// Discard active requests and their timers.
    Reset,

    // ========== Timer callbacks ==========
    /// Transit timer fired.
    DeliveryCompleted {
        /// Delivery the timer was scheduled for
        id: RequestId,
    },

    /// Acknowledgement timer fired.
    EmergencyAcknowledged {
        /// Emergency the timer was scheduled for
        id: RequestId,
    },
}
