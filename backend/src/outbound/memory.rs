//! In-memory adapter for the user and shipment repository ports.
//!
//! Holds the collection root behind an async mutex. Used by tests and by the
//! server when no data file is configured.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::ports::{
    ShipmentPersistenceError, ShipmentRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{Shipment, ShipmentId, User, UserId, Username};

use super::document::StoreDocument;

/// Volatile store implementing both repository ports.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    document: Mutex<StoreDocument>,
}

impl InMemoryStore {
    /// Start from an existing document.
    #[must_use]
    pub fn with_document(document: StoreDocument) -> Self {
        Self {
            document: Mutex::new(document),
        }
    }

    /// Copy of the current document.
    pub async fn snapshot(&self) -> StoreDocument {
        self.document.lock().await.clone()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.document.lock().await.users.clone())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.document.lock().await.find_user_by_username(username))
    }

    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        self.document.lock().await.insert_user(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<bool, UserPersistenceError> {
        Ok(self.document.lock().await.replace_user(user.clone()))
    }
}

#[async_trait]
impl ShipmentRepository for InMemoryStore {
    async fn find_by_id(
        &self,
        id: &ShipmentId,
    ) -> Result<Option<Shipment>, ShipmentPersistenceError> {
        Ok(self.document.lock().await.find_shipment(id))
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Shipment>, ShipmentPersistenceError> {
        Ok(self.document.lock().await.shipments_for(user_id))
    }

    async fn save(&self, shipment: &Shipment) -> Result<(), ShipmentPersistenceError> {
        self.document.lock().await.put_shipment(shipment.clone());
        Ok(())
    }

    async fn delete(&self, id: &ShipmentId) -> Result<bool, ShipmentPersistenceError> {
        Ok(self.document.lock().await.remove_shipment(id))
    }
}
