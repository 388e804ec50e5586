//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **json_store**: the flat JSON document used in production.
//! - **memory**: a volatile store for tests and throwaway runs.
//!
//! Adapters are thin translators between the domain types and the persisted
//! collection root. They contain no business rules; tracking id uniqueness
//! and ownership checks live in the domain services.

pub mod document;
pub mod json_store;
pub mod memory;
