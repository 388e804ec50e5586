//! Driving port for shipment mutations.
//!
//! Inbound adapters validate payloads into these request types; the service
//! behind the port owns ownership checks and tracking id uniqueness.

use async_trait::async_trait;

use crate::domain::{Error, Shipment, ShipmentDetails, ShipmentId, UserId};

/// Register a new shipment for `user_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateShipmentRequest {
    pub user_id: UserId,
    pub details: ShipmentDetails,
}

/// Replace the editable fields of shipment `id` owned by `user_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateShipmentRequest {
    pub id: ShipmentId,
    pub user_id: UserId,
    pub details: ShipmentDetails,
}

/// Remove shipment `id` owned by `user_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteShipmentRequest {
    pub id: ShipmentId,
    pub user_id: UserId,
}

/// Domain use-case port for creating, updating and deleting shipments.
///
/// Errors use `invalid_request` with `details.code = "duplicate_tracking_id"`
/// for uniqueness violations and `not_found` when the shipment is missing or
/// owned by someone else.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShipmentCommand: Send + Sync {
    /// Create a shipment and return the stored record.
    async fn create(&self, request: CreateShipmentRequest) -> Result<Shipment, Error>;

    /// Update a shipment and return the stored record.
    async fn update(&self, request: UpdateShipmentRequest) -> Result<Shipment, Error>;

    /// Delete a shipment.
    async fn delete(&self, request: DeleteShipmentRequest) -> Result<(), Error>;
}
