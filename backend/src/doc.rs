//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: account, shipment and health endpoints from the inbound layer
//! - **Schemas**: Domain type wrappers ([`ErrorSchema`], [`ShipmentSchema`]
//!   and friends) that provide OpenAPI definitions without coupling domain
//!   types to the utoipa framework
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::accounts::{AccountResponse, CredentialsRequest, LoginResponse};
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, ShipmentPageSchema, ShipmentSchema, ShipmentStatsSchema,
    ShipmentStatusSchema,
};
use crate::inbound::http::shipments::{DeleteShipmentBody, MessageResponse, ShipmentRequest};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shipment tracker API",
        description = "Per-user shipment tracking with signup, login and health probes.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::accounts::signup,
        crate::inbound::http::accounts::login,
        crate::inbound::http::shipments::list_shipments,
        crate::inbound::http::shipments::shipment_stats,
        crate::inbound::http::shipments::create_shipment,
        crate::inbound::http::shipments::update_shipment,
        crate::inbound::http::shipments::delete_shipment,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        ShipmentSchema,
        ShipmentStatusSchema,
        ShipmentPageSchema,
        ShipmentStatsSchema,
        CredentialsRequest,
        AccountResponse,
        LoginResponse,
        ShipmentRequest,
        DeleteShipmentBody,
        MessageResponse,
    )),
    tags(
        (name = "accounts", description = "Signup and login"),
        (name = "shipments", description = "Shipments owned by a user"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
