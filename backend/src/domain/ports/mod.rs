//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`, `*Service`) are called by inbound
//! adapters. Driven ports (`*Repository`) are implemented by outbound
//! adapters and expose typed errors generated by [`define_port_error`].

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod shipment_command;
mod shipment_query;
mod shipment_repository;
mod signup_service;
mod user_repository;

pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use shipment_command::MockShipmentCommand;
pub use shipment_command::{
    CreateShipmentRequest, DeleteShipmentRequest, ShipmentCommand, UpdateShipmentRequest,
};
#[cfg(test)]
pub use shipment_query::MockShipmentQuery;
pub use shipment_query::ShipmentQuery;
#[cfg(test)]
pub use shipment_repository::MockShipmentRepository;
pub use shipment_repository::{ShipmentPersistenceError, ShipmentRepository};
#[cfg(test)]
pub use signup_service::MockSignupService;
pub use signup_service::SignupService;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
