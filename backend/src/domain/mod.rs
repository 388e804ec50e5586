//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed entities used by the HTTP and persistence
//! adapters, and the services that implement the driving ports. Types keep
//! their invariants behind constructors and document their serde contracts.
//!
//! Public surface:
//! - Error / ErrorCode / ValidationCode: transport-agnostic failure payload.
//! - User, UserId, Username, PasswordHash, StoredPassword, Credentials: accounts.
//! - Shipment and its value types: tracked parcels.
//! - ShipmentFilter, Pagination, ShipmentPage, ShipmentStats: read models.
//! - AccountService, ShipmentCommandService, ShipmentQueryService.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod password;
pub mod ports;
pub mod shipment;
pub mod shipment_query;
pub mod shipment_service;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{Credentials, CredentialsValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER, ValidationCode};
pub use self::password::{PasswordHash, PasswordHashError, StoredPassword};
pub use self::shipment::{
    EXPRESS_LABEL, STANDARD_LABEL, Shipment, ShipmentDetails, ShipmentId, ShipmentStatus,
    ShipmentValidationError, TrackingId,
};
pub use self::shipment_query::{
    DEFAULT_LIMIT, DEFAULT_PAGE, Pagination, PaginationError, ShipmentFilter, ShipmentListQuery,
    ShipmentPage, ShipmentStats,
};
pub use self::shipment_service::{ShipmentCommandService, ShipmentQueryService};
pub use self::trace_id::TraceId;
pub use self::user::{User, UserId, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use shipment_tracker::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("nope"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
