//! Shipment aggregate and its value types.
//!
//! A shipment belongs to exactly one owner. Its tracking identifier is unique
//! per owner, compared case-insensitively; the mutation service enforces that
//! rule because the store does not.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

/// Search label matched for shipments flagged for express delivery.
pub const EXPRESS_LABEL: &str = "express";
/// Search label matched for shipments without express delivery.
pub const STANDARD_LABEL: &str = "standard";

/// Validation errors raised by shipment value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShipmentValidationError {
    /// The shipment identifier was blank.
    #[error("shipment id must not be empty")]
    EmptyId,
    /// The tracking identifier was blank.
    #[error("tracking id must not be empty")]
    EmptyTrackingId,
    /// The status label is not one of the known statuses.
    #[error("status must be one of Pending, In Transit, Delivered, Cancelled")]
    UnknownStatus { value: String },
}

/// Shipment identifier assigned on creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShipmentId(String);

impl ShipmentId {
    /// Validate and construct a [`ShipmentId`].
    pub fn new(id: impl AsRef<str>) -> Result<Self, ShipmentValidationError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ShipmentValidationError::EmptyId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl AsRef<str> for ShipmentId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ShipmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ShipmentId> for String {
    fn from(value: ShipmentId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ShipmentId {
    type Error = ShipmentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Carrier tracking identifier supplied by the user.
///
/// Stored exactly as supplied; equality for the uniqueness rule ignores case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TrackingId(String);

impl TrackingId {
    /// Validate and construct a [`TrackingId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ShipmentValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ShipmentValidationError::EmptyTrackingId);
        }
        Ok(Self(value))
    }

    /// Case-insensitive equality used by the per-owner uniqueness rule.
    #[must_use]
    pub fn eq_ignore_case(&self, other: &Self) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }
}

impl AsRef<str> for TrackingId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TrackingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<TrackingId> for String {
    fn from(value: TrackingId) -> Self {
        value.0
    }
}

impl TryFrom<String> for TrackingId {
    type Error = ShipmentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Delivery lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipmentStatus {
    /// Registered but not yet handed to the carrier.
    Pending,
    /// On its way.
    #[serde(rename = "In Transit")]
    InTransit,
    /// Arrived at its destination.
    Delivered,
    /// Abandoned before delivery.
    Cancelled,
}

impl ShipmentStatus {
    /// Every status in display order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::InTransit,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Wire label, e.g. `In Transit`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InTransit => "In Transit",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipmentStatus {
    type Err = ShipmentValidationError;

    /// Parse an exact wire label. Matching is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ShipmentValidationError::UnknownStatus {
                value: s.to_owned(),
            })
    }
}

/// User-editable shipment fields, shared by create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentDetails {
    pub tracking_id: TrackingId,
    pub status: ShipmentStatus,
    pub express_delivery: bool,
}

/// Tracked shipment.
///
/// ## Invariants
/// - `created_at <= updated_at`.
/// - `id`, `user_id` and `created_at` never change after creation.
///
/// Serialised camelCase: `{id, userId, trackingId, status, expressDelivery,
/// createdAt, updatedAt}` with RFC 3339 timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    id: ShipmentId,
    user_id: UserId,
    tracking_id: TrackingId,
    status: ShipmentStatus,
    #[serde(default)]
    express_delivery: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Shipment {
    /// Create a new shipment stamped with `now` for both timestamps.
    #[must_use]
    pub fn create(
        id: ShipmentId,
        user_id: UserId,
        details: ShipmentDetails,
        now: DateTime<Utc>,
    ) -> Self {
        let ShipmentDetails {
            tracking_id,
            status,
            express_delivery,
        } = details;
        Self {
            id,
            user_id,
            tracking_id,
            status,
            express_delivery,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the editable fields and bump `updated_at`.
    ///
    /// A clock that runs backwards never moves `updated_at` before
    /// `created_at`.
    pub fn revise(&mut self, details: ShipmentDetails, now: DateTime<Utc>) {
        self.tracking_id = details.tracking_id;
        self.status = details.status;
        self.express_delivery = details.express_delivery;
        self.updated_at = now.max(self.created_at);
    }

    /// Shipment identifier.
    #[must_use]
    pub fn id(&self) -> &ShipmentId {
        &self.id
    }

    /// Owner identifier.
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Carrier tracking identifier.
    #[must_use]
    pub fn tracking_id(&self) -> &TrackingId {
        &self.tracking_id
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> ShipmentStatus {
        self.status
    }

    /// Whether the shipment is flagged for express delivery.
    #[must_use]
    pub fn express_delivery(&self) -> bool {
        self.express_delivery
    }

    /// Creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// `express` or `standard`, as matched by free-text search.
    #[must_use]
    pub fn priority_label(&self) -> &'static str {
        if self.express_delivery {
            EXPRESS_LABEL
        } else {
            STANDARD_LABEL
        }
    }

    /// Whether this shipment is owned by `user_id`.
    #[must_use]
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}
