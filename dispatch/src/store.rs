//! Auth-gated facade over the dispatch reducer.

use crate::actions::DispatchAction;
use crate::environment::DispatchEnvironment;
use crate::error::{DispatchError, Result};
use crate::reducer::{DispatchReducer, EMERGENCY_ACK_TIMER, TRANSIT_TIMER};
use crate::types::{
    DeliveryForm, DeliveryRequest, DeliveryStatus, DispatchState, EmergencyForm, EmergencyRequest,
};
use medify_auth::{AuthGate, User};
use medify_runtime::{EffectHandle, Store};
use std::time::Duration;
use tokio::sync::broadcast;

type Inner = Store<DispatchState, DispatchAction, DispatchEnvironment, DispatchReducer>;

/// Tracks the active delivery and emergency for the presentation layer.
///
/// Submissions need a logged-in user and a complete form; both are checked
/// before any action reaches the reducer, so a refused submission never
/// changes state.
pub struct RequestTracker<G> {
    store: Inner,
    gate: G,
}

impl<G: AuthGate> RequestTracker<G> {
    /// Create a tracker gated by `gate`.
    #[must_use]
    pub fn new(gate: G, environment: DispatchEnvironment) -> Self {
        Self {
            store: Store::new(DispatchState::new(), DispatchReducer::new(), environment),
            gate,
        }
    }

    fn require_user(&self) -> Result<User> {
        self.gate.require_user().map_err(|_| {
            tracing::warn!("Dispatch request rejected: not logged in");
            DispatchError::AuthRequired
        })
    }

    /// Submit a delivery request. The new request starts `Confirmed` and
    /// replaces (and cancels the timer of) any active delivery.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::AuthRequired`] if nobody is logged in
    /// - [`DispatchError::Validation`] listing every missing field
    /// - [`DispatchError::Store`] if the tracker is shutting down
    #[tracing::instrument(skip(self, form))]
    pub async fn submit_delivery(&self, form: DeliveryForm) -> Result<DeliveryRequest> {
        let user = self.require_user()?;
        let delivery = form.validate().inspect_err(|error| {
            tracing::warn!(%error, "Delivery rejected");
        })?;

        self.store
            .send(DispatchAction::SubmitDelivery {
                user_id: user.id,
                delivery,
            })
            .await?;

        self.delivery().await.ok_or(DispatchError::InvalidTransition {
            from: None,
            attempted: "read back submitted delivery",
        })
    }

    /// Put the confirmed delivery in transit.
    ///
    /// Completion is scheduled after the configured transit delay. The
    /// returned handle resolves once the completion has been applied (or
    /// cancelled).
    ///
    /// # Errors
    ///
    /// - [`DispatchError::InvalidTransition`] unless the active delivery is `Confirmed`
    /// - [`DispatchError::Store`] if the tracker is shutting down
    #[tracing::instrument(skip(self))]
    pub async fn begin_transit(&self) -> Result<EffectHandle> {
        let status = self.store.state(DispatchState::delivery_status).await;
        if status != Some(DeliveryStatus::Confirmed) {
            tracing::error!(?status, "Invalid transition: begin transit outside confirmed");
            return Err(DispatchError::InvalidTransition {
                from: status,
                attempted: "begin transit",
            });
        }

        Ok(self.store.send(DispatchAction::BeginTransit).await?)
    }

    /// Submit an emergency request. It is acknowledged automatically after
    /// the configured delay; the returned snapshot may predate that.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::AuthRequired`] if nobody is logged in
    /// - [`DispatchError::Validation`] listing every missing field
    /// - [`DispatchError::Store`] if the tracker is shutting down
    #[tracing::instrument(skip(self, form))]
    pub async fn submit_emergency(&self, form: EmergencyForm) -> Result<EmergencyRequest> {
        let user = self.require_user()?;
        let emergency = form.validate().inspect_err(|error| {
            tracing::warn!(%error, "Emergency rejected");
        })?;

        self.store
            .send(DispatchAction::SubmitEmergency {
                user_id: user.id,
                emergency,
            })
            .await?;

        self.emergency().await.ok_or(DispatchError::InvalidTransition {
            from: None,
            attempted: "read back submitted emergency",
        })
    }

    /// Discard active requests and cancel their timers.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Store`] if the tracker is shutting down.
    pub async fn reset(&self) -> Result<()> {
        self.store.send(DispatchAction::Reset).await?;
        Ok(())
    }

    /// Active delivery snapshot.
    pub async fn delivery(&self) -> Option<DeliveryRequest> {
        self.store.state(|s| s.delivery.clone()).await
    }

    /// Active emergency snapshot.
    pub async fn emergency(&self) -> Option<EmergencyRequest> {
        self.store.state(|s| s.emergency.clone()).await
    }

    /// Full state snapshot.
    pub async fn snapshot(&self) -> DispatchState {
        self.store.state(Clone::clone).await
    }

    /// Timer-produced actions (`DeliveryCompleted`, `EmergencyAcknowledged`).
    ///
    /// An action is broadcast just before it is applied.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DispatchAction> {
        self.store.subscribe_actions()
    }

    /// Number of outstanding timers (0, 1 or 2).
    #[must_use]
    pub fn outstanding_timers(&self) -> usize {
        self.store.outstanding(&TRANSIT_TIMER) + self.store.outstanding(&EMERGENCY_ACK_TIMER)
    }

    /// Stop accepting requests and wait for outstanding timers.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Store`] if timers are still running at the deadline.
    pub async fn shutdown(&self, timeout: Duration) -> Result<()> {
        Ok(self.store.shutdown(timeout).await?)
    }
}
