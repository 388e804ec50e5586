//! Driving port for shipment reads.

use async_trait::async_trait;

use crate::domain::{Error, ShipmentListQuery, ShipmentPage, ShipmentStats, UserId};

/// Domain use-case port for listing shipments and summarising them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShipmentQuery: Send + Sync {
    /// Filtered, paginated listing of one owner's shipments.
    async fn list(&self, query: &ShipmentListQuery) -> Result<ShipmentPage, Error>;

    /// Status and express counts over all of one owner's shipments.
    async fn stats(&self, user_id: &UserId) -> Result<ShipmentStats, Error>;
}
