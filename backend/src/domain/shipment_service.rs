//! Shipment domain services.
//!
//! These services implement the shipment driving ports on top of a
//! [`ShipmentRepository`]. The command service serialises every
//! check-then-write sequence behind one async lock so the per-owner tracking
//! id rule holds for concurrent requests in this process.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::ports::{
    CreateShipmentRequest, DeleteShipmentRequest, ShipmentCommand, ShipmentQuery,
    ShipmentRepository, UpdateShipmentRequest,
};
use crate::domain::{
    Error, Shipment, ShipmentId, ShipmentListQuery, ShipmentPage, ShipmentStats, TrackingId,
    UserId, ValidationCode,
};

fn shipment_not_found(id: &ShipmentId) -> Error {
    Error::not_found(format!("shipment {id} not found"))
}

fn duplicate_tracking_id(tracking_id: &TrackingId) -> Error {
    Error::validation(
        ValidationCode::DuplicateTrackingId,
        "trackingId",
        format!("tracking id {tracking_id} already exists"),
    )
}

/// Reject `tracking_id` if any of `siblings` other than `exclude` uses it.
fn ensure_unique_tracking_id(
    siblings: &[Shipment],
    tracking_id: &TrackingId,
    exclude: Option<&ShipmentId>,
) -> Result<(), Error> {
    let clash = siblings
        .iter()
        .filter(|shipment| exclude.is_none_or(|id| shipment.id() != id))
        .any(|shipment| shipment.tracking_id().eq_ignore_case(tracking_id));
    if clash {
        return Err(duplicate_tracking_id(tracking_id));
    }
    Ok(())
}

/// Shipment service implementing the command driving port.
#[derive(Clone)]
pub struct ShipmentCommandService<R> {
    shipment_repo: Arc<R>,
    clock: Arc<dyn Clock>,
    write_lock: Arc<Mutex<()>>,
}

impl<R> ShipmentCommandService<R> {
    /// Create a new command service with the shipment repository and clock.
    pub fn new(shipment_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            shipment_repo,
            clock,
            write_lock: Arc::new(Mutex::new(())),
        }
    }
}

impl<R> ShipmentCommandService<R>
where
    R: ShipmentRepository,
{
    async fn owned_shipment(&self, id: &ShipmentId, user_id: &UserId) -> Result<Shipment, Error> {
        self.shipment_repo
            .find_by_id(id)
            .await?
            .filter(|shipment| shipment.is_owned_by(user_id))
            .ok_or_else(|| shipment_not_found(id))
    }
}

#[async_trait]
impl<R> ShipmentCommand for ShipmentCommandService<R>
where
    R: ShipmentRepository,
{
    async fn create(&self, request: CreateShipmentRequest) -> Result<Shipment, Error> {
        let CreateShipmentRequest { user_id, details } = request;
        let _guard = self.write_lock.lock().await;

        let siblings = self.shipment_repo.list_for_user(&user_id).await?;
        ensure_unique_tracking_id(&siblings, &details.tracking_id, None)?;

        let shipment = Shipment::create(ShipmentId::random(), user_id, details, self.clock.utc());
        self.shipment_repo.save(&shipment).await?;
        info!(
            shipment_id = %shipment.id(),
            user_id = %shipment.user_id(),
            "shipment created"
        );
        Ok(shipment)
    }

    async fn update(&self, request: UpdateShipmentRequest) -> Result<Shipment, Error> {
        let UpdateShipmentRequest {
            id,
            user_id,
            details,
        } = request;
        let _guard = self.write_lock.lock().await;

        let mut shipment = self.owned_shipment(&id, &user_id).await?;
        let siblings = self.shipment_repo.list_for_user(&user_id).await?;
        ensure_unique_tracking_id(&siblings, &details.tracking_id, Some(&id))?;

        shipment.revise(details, self.clock.utc());
        self.shipment_repo.save(&shipment).await?;
        info!(shipment_id = %id, user_id = %user_id, "shipment updated");
        Ok(shipment)
    }

    async fn delete(&self, request: DeleteShipmentRequest) -> Result<(), Error> {
        let DeleteShipmentRequest { id, user_id } = request;
        let _guard = self.write_lock.lock().await;

        self.owned_shipment(&id, &user_id).await?;
        if !self.shipment_repo.delete(&id).await? {
            return Err(shipment_not_found(&id));
        }
        info!(shipment_id = %id, user_id = %user_id, "shipment deleted");
        Ok(())
    }
}

/// Shipment service implementing the query driving port.
#[derive(Clone)]
pub struct ShipmentQueryService<R> {
    shipment_repo: Arc<R>,
}

impl<R> ShipmentQueryService<R> {
    /// Create a new query service with the shipment repository.
    pub fn new(shipment_repo: Arc<R>) -> Self {
        Self { shipment_repo }
    }
}

#[async_trait]
impl<R> ShipmentQuery for ShipmentQueryService<R>
where
    R: ShipmentRepository,
{
    async fn list(&self, query: &ShipmentListQuery) -> Result<ShipmentPage, Error> {
        let owned = self.shipment_repo.list_for_user(&query.user_id).await?;
        Ok(ShipmentPage::select(owned, &query.filter, query.pagination))
    }

    async fn stats(&self, user_id: &UserId) -> Result<ShipmentStats, Error> {
        let owned = self.shipment_repo.list_for_user(user_id).await?;
        Ok(ShipmentStats::tally(user_id, &owned))
    }
}

#[cfg(test)]
#[path = "shipment_service_tests.rs"]
mod tests;
