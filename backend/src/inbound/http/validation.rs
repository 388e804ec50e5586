//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request DTOs keep every field optional and stringly typed so that missing
//! or malformed values surface as `invalid_request` payloads carrying
//! `{field, code}` details instead of opaque extractor errors.

use serde_json::json;

use crate::domain::{
    Credentials, CredentialsValidationError, DEFAULT_LIMIT, DEFAULT_PAGE, Error, Pagination,
    PaginationError, ShipmentId, ShipmentStatus, TrackingId, UserId, ValidationCode,
};

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const USER_ID: FieldName = FieldName::new("userId");
pub(crate) const TRACKING_ID: FieldName = FieldName::new("trackingId");
pub(crate) const STATUS: FieldName = FieldName::new("status");
pub(crate) const SHIPMENT_ID: FieldName = FieldName::new("id");
pub(crate) const USERNAME: FieldName = FieldName::new("username");
pub(crate) const PASSWORD: FieldName = FieldName::new("password");
pub(crate) const PAGE: FieldName = FieldName::new("page");
pub(crate) const LIMIT: FieldName = FieldName::new("limit");

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::validation(
        ValidationCode::MissingField,
        field,
        format!("missing required field: {field}"),
    )
}

pub(crate) fn invalid_status_error(value: &str) -> Error {
    let labels: Vec<&str> = ShipmentStatus::ALL
        .iter()
        .map(|status| status.as_str())
        .collect();
    Error::invalid_request(format!("status must be one of: {}", labels.join(", "))).with_details(
        json!({
            "field": STATUS.as_str(),
            "value": value,
            "code": ValidationCode::InvalidStatus.as_str(),
        }),
    )
}

pub(crate) fn invalid_pagination_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a positive integer")).with_details(json!({
        "field": field,
        "value": value,
        "code": ValidationCode::InvalidPagination.as_str(),
    }))
}

/// Return the trimmed value, or `None` when absent or blank.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}

pub(crate) fn require_user_id(value: Option<&str>) -> Result<UserId, Error> {
    present(value)
        .and_then(|raw| UserId::new(raw).ok())
        .ok_or_else(|| missing_field_error(USER_ID))
}

pub(crate) fn require_shipment_id(value: &str) -> Result<ShipmentId, Error> {
    ShipmentId::new(value).map_err(|_| missing_field_error(SHIPMENT_ID))
}

pub(crate) fn require_tracking_id(value: Option<String>) -> Result<TrackingId, Error> {
    value
        .and_then(|raw| TrackingId::new(raw).ok())
        .ok_or_else(|| missing_field_error(TRACKING_ID))
}

pub(crate) fn require_status(value: Option<&str>) -> Result<ShipmentStatus, Error> {
    let raw = present(value).ok_or_else(|| missing_field_error(STATUS))?;
    raw.parse().map_err(|_| invalid_status_error(raw))
}

/// Parse an optional positive integer, falling back to `default` when absent.
pub(crate) fn parse_positive(
    value: Option<&str>,
    field: FieldName,
    default: usize,
) -> Result<usize, Error> {
    let Some(raw) = value else {
        return Ok(default);
    };
    match raw.trim().parse::<usize>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        _ => Err(invalid_pagination_error(field, raw)),
    }
}

/// Build a pagination window from optional `page` and `limit` parameters.
pub(crate) fn require_pagination(
    page: Option<&str>,
    limit: Option<&str>,
) -> Result<Pagination, Error> {
    let page = parse_positive(page, PAGE, DEFAULT_PAGE)?;
    let limit = parse_positive(limit, LIMIT, DEFAULT_LIMIT)?;
    Pagination::new(page, limit).map_err(|err| match err {
        PaginationError::ZeroPage => invalid_pagination_error(PAGE, "0"),
        PaginationError::ZeroLimit => invalid_pagination_error(LIMIT, "0"),
    })
}

pub(crate) fn map_credentials_error(err: &CredentialsValidationError) -> Error {
    match err {
        CredentialsValidationError::EmptyUsername => missing_field_error(USERNAME),
        CredentialsValidationError::EmptyPassword => missing_field_error(PASSWORD),
    }
}

/// Validate a username/password pair, reporting the first missing field.
pub(crate) fn require_credentials(
    username: Option<&str>,
    password: Option<&str>,
) -> Result<Credentials, Error> {
    Credentials::try_from_parts(username.unwrap_or_default(), password.unwrap_or_default())
        .map_err(|err| map_credentials_error(&err))
}
