//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the structure of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Login failed.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The shipment does not exist for this user.
    #[schema(rename = "not_found")]
    NotFound,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message. Validation failures carry `{field, code}` in `details`.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "missing required field: userId")]
    message: String,
    /// Correlation identifier, also returned in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    #[schema(example = json!({ "field": "userId", "code": "missing_field" }))]
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::ShipmentStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ShipmentStatus)]
pub enum ShipmentStatusSchema {
    #[schema(rename = "Pending")]
    Pending,
    #[schema(rename = "In Transit")]
    InTransit,
    #[schema(rename = "Delivered")]
    Delivered,
    #[schema(rename = "Cancelled")]
    Cancelled,
}

/// OpenAPI schema for [`crate::domain::Shipment`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Shipment, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ShipmentSchema {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    /// Owner of the shipment.
    #[schema(example = "u1")]
    user_id: String,
    /// Carrier tracking number, unique per owner ignoring case.
    #[schema(example = "TRK1")]
    tracking_id: String,
    status: ShipmentStatusSchema,
    express_delivery: bool,
    #[schema(value_type = String, format = DateTime, example = "2024-05-01T09:00:00Z")]
    created_at: String,
    #[schema(value_type = String, format = DateTime, example = "2024-05-01T09:00:00Z")]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::ShipmentPage`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ShipmentPage, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ShipmentPageSchema {
    /// The requested slice, newest first.
    shipments: Vec<ShipmentSchema>,
    /// `ceil(totalShipments / limit)`.
    total_pages: usize,
    /// Matches before pagination.
    total_shipments: usize,
}

/// OpenAPI schema for [`crate::domain::ShipmentStats`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ShipmentStats, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ShipmentStatsSchema {
    total: usize,
    pending: usize,
    in_transit: usize,
    delivered: usize,
    cancelled: usize,
    /// Shipments flagged for express delivery.
    express: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_schema_uses_wire_field_names() {
        let schema_json = schema_to_json::<ErrorSchema>();
        // utoipa replaces :: with . in schema names
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert!(schema_json.contains("traceId"), "schema should use traceId");
        assert!(!schema_json.contains("trace_id"));
    }

    #[rstest]
    #[case("invalid_request")]
    #[case("unauthorized")]
    #[case("not_found")]
    #[case("internal_error")]
    fn error_code_schema_lists_variant(#[case] variant: &str) {
        assert!(schema_to_json::<ErrorCodeSchema>().contains(variant));
    }

    #[test]
    fn status_schema_uses_display_labels() {
        let schema_json = schema_to_json::<ShipmentStatusSchema>();
        assert_eq!(ShipmentStatusSchema::name(), "crate.domain.ShipmentStatus");
        assert!(schema_json.contains("In Transit"));
        assert!(!schema_json.contains("InTransit"));
    }

    #[rstest]
    #[case("trackingId")]
    #[case("expressDelivery")]
    #[case("createdAt")]
    #[case("updatedAt")]
    fn shipment_schema_is_camel_case(#[case] field: &str) {
        assert!(schema_to_json::<ShipmentSchema>().contains(field));
    }

    #[test]
    fn page_and_stats_schemas_are_camel_case() {
        assert!(schema_to_json::<ShipmentPageSchema>().contains("totalShipments"));
        assert!(schema_to_json::<ShipmentStatsSchema>().contains("inTransit"));
    }
}
