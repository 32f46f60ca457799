//! Dispatch domain types.

use crate::error::{DispatchError, Result};
use medify_auth::UserId;
use medify_core::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordinates recorded when the user leaves the field empty.
pub const AUTO_GPS: &str = "Automatic GPS tracking";

/// The two kinds of request the tracker handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestKind {
    /// Drone medicine delivery
    Delivery,
    /// Emergency response
    Emergency,
}

impl RequestKind {
    /// Id prefix for the kind.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Delivery => "DR",
            Self::Emergency => "EM",
        }
    }
}

/// Request identifier: a kind prefix, a dash and six digits (`DR-004211`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Build an id from a kind and a sequence number (reduced to 6 digits).
    #[must_use]
    pub fn new(kind: RequestKind, sequence: u32) -> Self {
        Self(format!("{}-{:06}", kind.prefix(), sequence % 1_000_000))
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Delivery lifecycle.
///
/// Transitions only ever move forward:
/// `Confirmed → InTransit → Delivered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryStatus {
    /// Reserved. No transition produces it; submitted requests start `Confirmed`.
    Pending,
    /// Accepted and waiting for dispatch
    Confirmed,
    /// Drone on its way; completion is scheduled
    InTransit,
    /// Terminal
    Delivered,
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::InTransit => "in-transit",
            Self::Delivered => "delivered",
        })
    }
}

/// A drone delivery request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRequest {
    /// `DR-` id
    pub id: RequestId,
    /// Delivery address
    pub address: String,
    /// Coordinates, or [`AUTO_GPS`]
    pub coordinates: String,
    /// What to deliver
    pub medicine_description: String,
    /// Contact number
    pub phone_number: String,
    /// Whether the payload must stay refrigerated
    pub cold_chain_required: bool,
    /// Lifecycle position
    pub status: DeliveryStatus,
    /// Estimated flight time in minutes
    pub estimated_minutes: u32,
    /// Who asked for it
    pub requested_by: UserId,
    /// When it was accepted
    pub submitted_at: DateTime<Utc>,
}

/// Emergency lifecycle: `Submitted → Confirmed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmergencyStatus {
    /// Received, not yet acknowledged
    Submitted,
    /// Acknowledged; help is on the way
    Confirmed,
}

/// An emergency response request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyRequest {
    /// `EM-` id
    pub id: RequestId,
    /// Where help is needed
    pub location: String,
    /// Coordinates, or [`AUTO_GPS`]
    pub coordinates: String,
    /// What happened
    pub description: String,
    /// Contact number
    pub phone_number: String,
    /// Set once the request is acknowledged
    pub confirmed: bool,
    /// Who asked for it
    pub requested_by: UserId,
    /// When it was received
    pub submitted_at: DateTime<Utc>,
}

impl EmergencyRequest {
    /// Lifecycle position.
    #[must_use]
    pub const fn status(&self) -> EmergencyStatus {
        if self.confirmed {
            EmergencyStatus::Confirmed
        } else {
            EmergencyStatus::Submitted
        }
    }
}

/// Tracker state: at most one delivery and one emergency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchState {
    /// Active delivery
    pub delivery: Option<DeliveryRequest>,
    /// Active emergency
    pub emergency: Option<EmergencyRequest>,
}

impl DispatchState {
    /// Create an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Status of the active delivery.
    #[must_use]
    pub fn delivery_status(&self) -> Option<DeliveryStatus> {
        self.delivery.as_ref().map(|d| d.status)
    }
}

fn missing_fields(fields: &[(&'static str, &str)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect()
}

fn coordinates_or_auto(coordinates: String) -> String {
    if coordinates.trim().is_empty() {
        AUTO_GPS.to_string()
    } else {
        coordinates
    }
}

/// Delivery form as filled in by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryForm {
    /// Delivery address (required)
    pub address: String,
    /// Coordinates (optional)
    pub coordinates: String,
    /// Medicines (required)
    pub medicine_description: String,
    /// Contact number (required)
    pub phone_number: String,
    /// Refrigerated transport
    pub cold_chain_required: bool,
}

impl DeliveryForm {
    /// Check required fields.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Validation`] listing every empty required field.
    pub fn validate(self) -> Result<ValidatedDelivery> {
        let missing = missing_fields(&[
            ("address", self.address.as_str()),
            ("medicines", self.medicine_description.as_str()),
            ("phone number", self.phone_number.as_str()),
        ]);
        if !missing.is_empty() {
            return Err(DispatchError::Validation { missing });
        }

        Ok(ValidatedDelivery {
            address: self.address,
            coordinates: coordinates_or_auto(self.coordinates),
            medicine_description: self.medicine_description,
            phone_number: self.phone_number,
            cold_chain_required: self.cold_chain_required,
        })
    }
}

/// A delivery form with every required field present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDelivery {
    pub(crate) address: String,
    pub(crate) coordinates: String,
    pub(crate) medicine_description: String,
    pub(crate) phone_number: String,
    pub(crate) cold_chain_required: bool,
}

impl ValidatedDelivery {
    /// Delivery address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Coordinates, defaulted to [`AUTO_GPS`].
    #[must_use]
    pub fn coordinates(&self) -> &str {
        &self.coordinates
    }
}

/// Emergency form as filled in by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmergencyForm {
    /// Location (required)
    pub location: String,
    /// Coordinates (optional)
    pub coordinates: String,
    /// What happened (required)
    pub description: String,
    /// Contact number (required)
    pub phone_number: String,
}

impl EmergencyForm {
    /// Check required fields.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Validation`] listing every empty required field.
    pub fn validate(self) -> Result<ValidatedEmergency> {
        let missing = missing_fields(&[
            ("location", self.location.as_str()),
            ("description", self.description.as_str()),
            ("phone number", self.phone_number.as_str()),
        ]);
        if !missing.is_empty() {
            return Err(DispatchError::Validation { missing });
        }

        Ok(ValidatedEmergency {
            location: self.location,
            coordinates: coordinates_or_auto(self.coordinates),
            description: self.description,
            phone_number: self.phone_number,
        })
    }
}

/// An emergency form with every required field present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEmergency {
    pub(crate) location: String,
    pub(crate) coordinates: String,
    pub(crate) description: String,
    pub(crate) phone_number: String,
}

impl ValidatedEmergency {
    /// Location.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }
}
