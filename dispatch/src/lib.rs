//! # Medify Dispatch
//!
//! Lifecycle tracking for drone deliveries and emergency requests.
//!
//! ```text
//! delivery:  Confirmed ──begin_transit──▶ InTransit ──(5 s timer)──▶ Delivered
//! emergency: Submitted ──(ack timer)──▶ Confirmed
//! ```
//!
//! `Pending` exists in [`DeliveryStatus`] but is reserved: a submitted
//! delivery starts `Confirmed`.
//!
//! Timers are cancellable runtime effects. At most one transit timer and one
//! acknowledgement timer are outstanding; a new submission or a reset
//! cancels them.
//!
//! ## Example
//!
//! ```rust,ignore
//! let tracker = RequestTracker::new(gate, DispatchEnvironment::new(config, Arc::new(SystemClock)));
//! let request = tracker.submit_delivery(form).await?;
//! let mut handle = tracker.begin_transit().await?;
//! handle.wait().await;
//! assert_eq!(tracker.delivery().await.map(|d| d.status), Some(DeliveryStatus::Delivered));
//! ```

pub mod actions;
pub mod config;
pub mod environment;
pub mod error;
pub mod location;
pub mod reducer;
pub mod store;
pub mod types;

pub use actions::DispatchAction;
pub use config::DispatchConfig;
pub use environment::{
    DispatchEnvironment, EtaEstimator, FixedEta, IdGenerator, RandomEta, SequentialIds,
    sequence_seed,
};
pub use error::{DispatchError, Result};
pub use location::{DETECTED_LOCATION, detect_location};
pub use reducer::{DispatchReducer, EMERGENCY_ACK_TIMER, TRANSIT_TIMER};
pub use store::RequestTracker;
pub use types::{
    AUTO_GPS, DeliveryForm, DeliveryRequest, DeliveryStatus, DispatchState, EmergencyForm,
    EmergencyRequest, EmergencyStatus, RequestId, RequestKind, ValidatedDelivery,
    ValidatedEmergency,
};
