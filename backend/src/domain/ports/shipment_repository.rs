//! Port abstraction for shipment persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Shipment, ShipmentId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by shipment repository adapters.
    pub enum ShipmentPersistenceError {
        /// The backing document could not be read.
        Load { message: String } => "shipment repository load failed: {message}",
        /// The backing document could not be written.
        Save { message: String } => "shipment repository save failed: {message}",
    }
}

/// Driven port for shipment records.
///
/// Adapters keep records in collection order: new shipments go to the head
/// and replacements keep their slot. The port does not enforce tracking id
/// uniqueness.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShipmentRepository: Send + Sync {
    /// Fetch a shipment by identifier regardless of owner.
    async fn find_by_id(&self, id: &ShipmentId)
    -> Result<Option<Shipment>, ShipmentPersistenceError>;

    /// Fetch every shipment owned by `user_id`, in collection order.
    async fn list_for_user(&self, user_id: &UserId)
    -> Result<Vec<Shipment>, ShipmentPersistenceError>;

    /// Replace the record with the same id in place, or insert it at the head.
    async fn save(&self, shipment: &Shipment) -> Result<(), ShipmentPersistenceError>;

    /// Remove the record with `id`. Returns `false` when nothing was removed.
    async fn delete(&self, id: &ShipmentId) -> Result<bool, ShipmentPersistenceError>;
}
