//! Reducer for the request lifecycle.
//!
//! ```text
//! delivery:  ── SubmitDelivery ──▶ Confirmed ── BeginTransit ──▶ InTransit ── (timer) ──▶ Delivered
//! emergency: ── SubmitEmergency ─▶ Submitted ── (timer) ──▶ Confirmed
//! ```
//!
//! Each timer runs under its own cancellation id. Replacing or resetting a
//! request cancels the id; the callback also checks the request id, so a
//! timer that slips through the cancel still cannot touch a newer request.

use crate::actions::DispatchAction;
use crate::environment::DispatchEnvironment;
use crate::types::{
    DeliveryRequest, DeliveryStatus, DispatchState, EmergencyRequest, RequestKind,
};
use medify_core::effect::{Effect, EffectId};
use medify_core::environment::Clock;
use medify_core::{SmallVec, reducer::Reducer, smallvec};

/// Cancellation id of the transit timer.
pub const TRANSIT_TIMER: EffectId = EffectId::from_static("dispatch.transit");

/// Cancellation id of the emergency acknowledgement timer.
pub const EMERGENCY_ACK_TIMER: EffectId = EffectId::from_static("dispatch.emergency_ack");

/// Reducer for deliveries and emergencies.
#[derive(Clone, Debug, Default)]
pub struct DispatchReducer;

impl DispatchReducer {
    /// Creates a new `DispatchReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for DispatchReducer {
    type State = DispatchState;
    type Action = DispatchAction;
    type Environment = DispatchEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per transition
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            DispatchAction::SubmitDelivery { user_id, delivery } => {
                let replaced = state.delivery.take();

                let request = DeliveryRequest {
                    id: env.ids.next_id(RequestKind::Delivery),
                    address: delivery.address,
                    coordinates: delivery.coordinates,
                    medicine_description: delivery.medicine_description,
                    phone_number: delivery.phone_number,
                    cold_chain_required: delivery.cold_chain_required,
                    status: DeliveryStatus::Confirmed,
                    estimated_minutes: env.eta.estimate_minutes(),
                    requested_by: user_id,
                    submitted_at: env.clock.now(),
                };
                tracing::info!(
                    request_id = %request.id,
                    eta_minutes = request.estimated_minutes,
                    "Delivery confirmed"
                );
                state.delivery = Some(request);

                match replaced {
                    Some(previous) => {
                        tracing::debug!(request_id = %previous.id, "Replaced previous delivery");
                        smallvec![Effect::Cancel(TRANSIT_TIMER)]
                    },
                    None => SmallVec::new(),
                }
            },

            DispatchAction::BeginTransit => {
                let status = state.delivery_status();
                let Some(delivery) = state
                    .delivery
                    .as_mut()
                    .filter(|d| d.status == DeliveryStatus::Confirmed)
                else {
                    tracing::error!(
                        status = ?status,
                        "Invalid transition: begin transit outside confirmed"
                    );
                    return SmallVec::new();
                };

                delivery.status = DeliveryStatus::InTransit;
                tracing::info!(
                    request_id = %delivery.id,
                    delay = ?env.config.transit_delay,
                    "Delivery in transit"
                );

                smallvec![
                    Effect::Delay {
                        duration: env.config.transit_delay,
                        action: Box::new(DispatchAction::DeliveryCompleted {
                            id: delivery.id.clone(),
                        }),
                    }
                    .cancellable(TRANSIT_TIMER)
                ]
            },

            DispatchAction::DeliveryCompleted { id } => {
                match state
                    .delivery
                    .as_mut()
                    .filter(|d| d.id == id && d.status == DeliveryStatus::InTransit)
                {
                    Some(delivery) => {
                        delivery.status = DeliveryStatus::Delivered;
                        tracing::info!(request_id = %id, "Delivery completed");
                    },
                    None => {
                        tracing::debug!(request_id = %id, "Ignoring stale delivery completion");
                    },
                }
                SmallVec::new()
            },

            DispatchAction::SubmitEmergency { user_id, emergency } => {
                let replaced = state.emergency.take();

                let request = EmergencyRequest {
                    id: env.ids.next_id(RequestKind::Emergency),
                    location: emergency.location,
                    coordinates: emergency.coordinates,
                    description: emergency.description,
                    phone_number: emergency.phone_number,
                    confirmed: false,
                    requested_by: user_id,
                    submitted_at: env.clock.now(),
                };
                tracing::info!(request_id = %request.id, "Emergency submitted");

                let acknowledge = Effect::Delay {
                    duration: env.config.emergency_ack_delay,
                    action: Box::new(DispatchAction::EmergencyAcknowledged {
                        id: request.id.clone(),
                    }),
                }
                .cancellable(EMERGENCY_ACK_TIMER);
                state.emergency = Some(request);

                if let Some(previous) = replaced {
                    tracing::debug!(request_id = %previous.id, "Replaced previous emergency");
                }
                smallvec![acknowledge]
            },

            DispatchAction::EmergencyAcknowledged { id } => {
                match state
                    .emergency
                    .as_mut()
                    .filter(|e| e.id == id && !e.confirmed)
                {
                    Some(emergency) => {
                        emergency.confirmed = true;
                        tracing::info!(request_id = %id, "Emergency acknowledged, help is on the way");
                    },
                    None => {
                        tracing::debug!(request_id = %id, "Ignoring stale acknowledgement");
                    },
                }
                SmallVec::new()
            },

            DispatchAction::Reset => {
                if state.delivery.is_some() || state.emergency.is_some() {
                    tracing::info!("Dispatch reset");
                }
                *state = DispatchState::new();
                smallvec![
                    Effect::Cancel(TRANSIT_TIMER),
                    Effect::Cancel(EMERGENCY_ACK_TIMER)
                ]
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DispatchConfig;
    use crate::environment::{FixedEta, SequentialIds};
    use crate::types::{DeliveryForm, EmergencyForm, RequestId, ValidatedDelivery};
    use medify_auth::UserId;
    use medify_testing::{ReducerTest, assertions, test_clock};
    use std::sync::Arc;
    use std::time::Duration;

    fn env() -> DispatchEnvironment {
        DispatchEnvironment::new(DispatchConfig::default(), Arc::new(test_clock()))
            .with_ids(SequentialIds::starting_at(42))
            .with_eta(FixedEta(27))
    }

    fn delivery() -> ValidatedDelivery {
        DeliveryForm {
            address: "12 Hill Rd".to_string(),
            medicine_description: "Insulin x2".to_string(),
            phone_number: "555-0100".to_string(),
            cold_chain_required: true,
            ..DeliveryForm::default()
        }
        .validate()
        .unwrap_or_else(|e| unreachable!("form is complete: {e}"))
    }

    fn confirmed_state() -> DispatchState {
        let mut state = DispatchState::new();
        let _ = DispatchReducer::new().reduce(
            &mut state,
            DispatchAction::SubmitDelivery {
                user_id: UserId::new("u-1"),
                delivery: delivery(),
            },
            &env(),
        );
        state
    }

    fn in_transit_state() -> DispatchState {
        let mut state = confirmed_state();
        let _ = DispatchReducer::new().reduce(&mut state, DispatchAction::BeginTransit, &env());
        state
    }

    fn delivery_id() -> RequestId {
        RequestId::new(RequestKind::Delivery, 42)
    }

    #[test]
    fn test_submit_delivery_confirms() {
        ReducerTest::new(DispatchReducer::new())
            .with_env(env())
            .given_state(DispatchState::new())
            .when_action(DispatchAction::SubmitDelivery {
                user_id: UserId::new("u-1"),
                delivery: delivery(),
            })
            .then_state(|state| {
                let delivery = state.delivery.as_ref();
                assert_eq!(delivery.map(|d| d.id.as_str()), Some("DR-000042"));
                assert_eq!(delivery.map(|d| d.status), Some(DeliveryStatus::Confirmed));
                assert_eq!(delivery.map(|d| d.estimated_minutes), Some(27));
                assert_eq!(
                    delivery.map(|d| d.coordinates.as_str()),
                    Some(crate::types::AUTO_GPS)
                );
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_submit_over_active_delivery_cancels_timer() {
        ReducerTest::new(DispatchReducer::new())
            .with_env(env())
            .given_state(in_transit_state())
            .when_action(DispatchAction::SubmitDelivery {
                user_id: UserId::new("u-1"),
                delivery: delivery(),
            })
            .then_state(|state| {
                assert_eq!(state.delivery_status(), Some(DeliveryStatus::Confirmed));
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_cancel_effect(effects, "dispatch.transit");
            })
            .run();
    }

    #[test]
    fn test_begin_transit_schedules_cancellable_completion() {
        ReducerTest::new(DispatchReducer::new())
            .with_env(env())
            .given_state(confirmed_state())
            .when_action(DispatchAction::BeginTransit)
            .then_state(|state| {
                assert_eq!(state.delivery_status(), Some(DeliveryStatus::InTransit));
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_cancellable_delay(effects, "dispatch.transit");
                assert!(matches!(
                    &effects[0],
                    Effect::Cancellable { effect, .. }
                        if matches!(
                            effect.as_ref(),
                            Effect::Delay { duration, action }
                                if *duration == Duration::from_secs(5)
                                    && **action == DispatchAction::DeliveryCompleted { id: delivery_id() }
                        )
                ));
            })
            .run();
    }

    #[test]
    fn test_begin_transit_without_delivery_is_rejected() {
        ReducerTest::new(DispatchReducer::new())
            .with_env(env())
            .given_state(DispatchState::new())
            .when_action(DispatchAction::BeginTransit)
            .then_state(|state| assert_eq!(*state, DispatchState::new()))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_begin_transit_twice_is_rejected() {
        let given = in_transit_state();
        let expected = given.clone();

        ReducerTest::new(DispatchReducer::new())
            .with_env(env())
            .given_state(given)
            .when_action(DispatchAction::BeginTransit)
            .then_state(move |state| assert_eq!(*state, expected))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_completion_delivers() {
        ReducerTest::new(DispatchReducer::new())
            .with_env(env())
            .given_state(in_transit_state())
            .when_action(DispatchAction::DeliveryCompleted { id: delivery_id() })
            .then_state(|state| {
                assert_eq!(state.delivery_status(), Some(DeliveryStatus::Delivered));
            })
            .run();
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let given = in_transit_state();
        let expected = given.clone();

        ReducerTest::new(DispatchReducer::new())
            .with_env(env())
            .given_state(given)
            .when_action(DispatchAction::DeliveryCompleted {
                id: RequestId::new(RequestKind::Delivery, 7),
            })
            .then_state(move |state| assert_eq!(*state, expected))
            .run();
    }

    #[test]
    fn test_completion_before_transit_is_ignored() {
        ReducerTest::new(DispatchReducer::new())
            .with_env(env())
            .given_state(confirmed_state())
            .when_action(DispatchAction::DeliveryCompleted { id: delivery_id() })
            .then_state(|state| {
                assert_eq!(state.delivery_status(), Some(DeliveryStatus::Confirmed));
            })
            .run();
    }

    #[test]
    fn test_reset_clears_and_cancels_timers() {
        ReducerTest::new(DispatchReducer::new())
            .with_env(env())
            .given_state(in_transit_state())
            .when_action(DispatchAction::Reset)
            .then_state(|state| assert_eq!(*state, DispatchState::new()))
            .then_effects(|effects| {
                assertions::assert_has_cancel_effect(effects, "dispatch.transit");
                assertions::assert_has_cancel_effect(effects, "dispatch.emergency_ack");
            })
            .run();
    }

    #[test]
    fn test_submit_emergency_schedules_acknowledgement() {
        let emergency = EmergencyForm {
            location: "Ridge trail, km 4".to_string(),
            description: "Hiker with a broken ankle".to_string(),
            phone_number: "555-0101".to_string(),
            ..EmergencyForm::default()
        }
        .validate()
        .unwrap_or_else(|e| unreachable!("form is complete: {e}"));

        ReducerTest::new(DispatchReducer::new())
            .with_env(env())
            .given_state(DispatchState::new())
            .when_action(DispatchAction::SubmitEmergency {
                user_id: UserId::new("u-1"),
                emergency,
            })
            .then_state(|state| {
                let emergency = state.emergency.as_ref();
                assert_eq!(emergency.map(|e| e.id.as_str()), Some("EM-000042"));
                assert_eq!(emergency.map(|e| e.confirmed), Some(false));
            })
            .then_effects(|effects| {
                assertions::assert_has_cancellable_delay(effects, "dispatch.emergency_ack");
            })
            .run();
    }

    #[test]
    fn test_acknowledgement_confirms_matching_emergency_only() {
        let mut state = DispatchState::new();
        let reducer = DispatchReducer::new();
        let env = env();
        let emergency = EmergencyForm {
            location: "Ridge trail".to_string(),
            description: "Fall".to_string(),
            phone_number: "555".to_string(),
            ..EmergencyForm::default()
        }
        .validate()
        .unwrap_or_else(|e| unreachable!("form is complete: {e}"));

        let _ = reducer.reduce(
            &mut state,
            DispatchAction::SubmitEmergency {
                user_id: UserId::new("u-1"),
                emergency,
            },
            &env,
        );

        let _ = reducer.reduce(
            &mut state,
            DispatchAction::EmergencyAcknowledged {
                id: RequestId::new(RequestKind::Emergency, 1),
            },
            &env,
        );
        assert_eq!(state.emergency.as_ref().map(|e| e.confirmed), Some(false));

        let _ = reducer.reduce(
            &mut state,
            DispatchAction::EmergencyAcknowledged {
                id: RequestId::new(RequestKind::Emergency, 42),
            },
            &env,
        );
        assert_eq!(
            state.emergency.map(|e| e.status()),
            Some(crate::types::EmergencyStatus::Confirmed)
        );
    }
}
