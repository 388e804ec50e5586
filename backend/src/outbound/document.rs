//! Collection root shared by the JSON and in-memory stores.
//!
//! The whole persisted state is one `{ "users": [...], "shipments": [...] }`
//! document. Adapters load it, apply one of the operations below, and save
//! it back as a unit.

use serde::{Deserialize, Serialize};

use crate::domain::{Shipment, ShipmentId, User, UserId, Username};

/// Persisted collection root. Missing arrays load as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub shipments: Vec<Shipment>,
}

impl StoreDocument {
    pub(crate) fn find_user_by_username(&self, username: &Username) -> Option<User> {
        self.users
            .iter()
            .find(|user| user.username() == username)
            .cloned()
    }

    pub(crate) fn insert_user(&mut self, user: User) {
        self.users.push(user);
    }

    /// Replace the user with the same id, reporting whether one matched.
    pub(crate) fn replace_user(&mut self, user: User) -> bool {
        match self.users.iter_mut().find(|existing| existing.id() == user.id()) {
            Some(slot) => {
                *slot = user;
                true
            }
            None => false,
        }
    }

    pub(crate) fn find_shipment(&self, id: &ShipmentId) -> Option<Shipment> {
        self.shipments
            .iter()
            .find(|shipment| shipment.id() == id)
            .cloned()
    }

    pub(crate) fn shipments_for(&self, user_id: &UserId) -> Vec<Shipment> {
        self.shipments
            .iter()
            .filter(|shipment| shipment.is_owned_by(user_id))
            .cloned()
            .collect()
    }

    /// Replace the shipment with the same id in place, or prepend it.
    pub(crate) fn put_shipment(&mut self, shipment: Shipment) {
        match self
            .shipments
            .iter_mut()
            .find(|existing| existing.id() == shipment.id())
        {
            Some(slot) => *slot = shipment,
            None => self.shipments.insert(0, shipment),
        }
    }

    /// Remove the shipment with `id`, reporting whether one was removed.
    pub(crate) fn remove_shipment(&mut self, id: &ShipmentId) -> bool {
        let before = self.shipments.len();
        self.shipments.retain(|shipment| shipment.id() != id);
        self.shipments.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ShipmentDetails, ShipmentStatus, TrackingId};
    use chrono::Utc;
    use rstest::rstest;

    fn shipment(id: &str, owner: &str, tracking_id: &str) -> Shipment {
        Shipment::create(
            ShipmentId::new(id).expect("valid id"),
            UserId::new(owner).expect("valid owner"),
            ShipmentDetails {
                tracking_id: TrackingId::new(tracking_id).expect("valid tracking id"),
                status: ShipmentStatus::Pending,
                express_delivery: false,
            },
            Utc::now(),
        )
    }

    fn ids(document: &StoreDocument) -> Vec<&str> {
        document
            .shipments
            .iter()
            .map(|shipment| shipment.id().as_ref())
            .collect()
    }

    #[rstest]
    fn put_prepends_new_and_replaces_existing_in_place() {
        let mut document = StoreDocument::default();
        document.put_shipment(shipment("s1", "u1", "A"));
        document.put_shipment(shipment("s2", "u1", "B"));
        document.put_shipment(shipment("s1", "u1", "A2"));

        assert_eq!(ids(&document), vec!["s2", "s1"]);
        let replaced = document
            .find_shipment(&ShipmentId::new("s1").expect("valid id"))
            .expect("present");
        assert_eq!(replaced.tracking_id().as_ref(), "A2");
    }

    #[rstest]
    fn remove_reports_whether_anything_matched() {
        let mut document = StoreDocument::default();
        document.put_shipment(shipment("s1", "u1", "A"));

        let id = ShipmentId::new("s1").expect("valid id");
        assert!(document.remove_shipment(&id));
        assert!(!document.remove_shipment(&id));
    }

    #[rstest]
    fn replace_user_matches_by_id_only() {
        let mut document: StoreDocument = serde_json::from_str(
            r#"{"users":[{"id":"u1","username":"bob","password":"pw"}]}"#,
        )
        .expect("parse");
        let stranger: User =
            serde_json::from_str(r#"{"id":"u2","username":"bob","password":"pw"}"#)
                .expect("parse");

        assert!(!document.replace_user(stranger));
        let existing = document.users.first().cloned().expect("user");
        assert!(document.replace_user(existing));
        assert_eq!(document.users.len(), 1);
    }

    #[rstest]
    #[case("{}")]
    #[case(r#"{"users": []}"#)]
    #[case(r#"{"shipments": []}"#)]
    fn missing_arrays_load_as_empty(#[case] raw: &str) {
        let document: StoreDocument = serde_json::from_str(raw).expect("parse");
        assert_eq!(document, StoreDocument::default());
    }
}
