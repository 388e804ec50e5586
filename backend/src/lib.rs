//! Backend library modules.
//!
//! Hexagonal layout: [`domain`] holds entities, services and ports;
//! [`inbound`] adapts HTTP requests onto the driving ports; [`outbound`]
//! implements the repository ports over a JSON document or memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
