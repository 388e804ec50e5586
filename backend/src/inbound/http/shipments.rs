//! Shipment API handlers.
//!
//! ```text
//! GET    /api/shipments?userId=u1&status=Pending&search=trk&page=1&limit=5
//! GET    /api/shipments/stats?userId=u1
//! POST   /api/shipments {"trackingId":"TRK1","status":"Pending","userId":"u1"}
//! PUT    /api/shipments/{id} {"trackingId":"TRK1","status":"Delivered","userId":"u1"}
//! DELETE /api/shipments/{id} {"userId":"u1"}
//! ```
//!
//! Every endpoint is scoped to the caller-supplied `userId`; a shipment owned
//! by someone else is reported exactly like a missing one.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{CreateShipmentRequest, DeleteShipmentRequest, UpdateShipmentRequest};
use crate::domain::{
    Shipment, ShipmentDetails, ShipmentFilter, ShipmentListQuery, ShipmentPage, ShipmentStats,
    UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    ErrorSchema, ShipmentPageSchema, ShipmentSchema, ShipmentStatsSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    require_pagination, require_shipment_id, require_status, require_tracking_id,
    require_user_id,
};

/// Query parameters for `GET /api/shipments`.
///
/// Numeric parameters arrive as strings so malformed values are reported as
/// `invalid_pagination` rather than rejected by the extractor.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ListShipmentsParams {
    /// Owner whose shipments are listed.
    pub user_id: Option<String>,
    /// Exact status label, e.g. `In Transit`.
    pub status: Option<String>,
    /// Case-insensitive term matched against tracking id, status and priority.
    pub search: Option<String>,
    /// One-based page number (default 1).
    pub page: Option<String>,
    /// Page size (default 5).
    pub limit: Option<String>,
}

/// Query parameters for `GET /api/shipments/stats`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct StatsParams {
    pub user_id: Option<String>,
}

/// Body for creating or replacing a shipment.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentRequest {
    #[schema(example = "TRK1")]
    pub tracking_id: Option<String>,
    #[schema(example = "Pending")]
    pub status: Option<String>,
    /// Defaults to `false` when omitted.
    pub express_delivery: Option<bool>,
    #[schema(example = "u1")]
    pub user_id: Option<String>,
}

impl ShipmentRequest {
    fn into_parts(self) -> ApiResult<(UserId, ShipmentDetails)> {
        let user_id = require_user_id(self.user_id.as_deref())?;
        let tracking_id = require_tracking_id(self.tracking_id)?;
        let status = require_status(self.status.as_deref())?;
        Ok((
            user_id,
            ShipmentDetails {
                tracking_id,
                status,
                express_delivery: self.express_delivery.unwrap_or(false),
            },
        ))
    }
}

/// Body for `DELETE /api/shipments/{id}`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteShipmentBody {
    #[schema(example = "u1")]
    pub user_id: Option<String>,
}

/// Confirmation returned after a delete.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Shipment deleted successfully")]
    pub message: String,
}

/// List a user's shipments, filtered and paginated, newest first.
#[utoipa::path(
    get,
    path = "/api/shipments",
    params(ListShipmentsParams),
    responses(
        (status = 200, description = "Page of shipments", body = ShipmentPageSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["shipments"],
    operation_id = "listShipments"
)]
#[get("/shipments")]
pub async fn list_shipments(
    state: web::Data<HttpState>,
    params: web::Query<ListShipmentsParams>,
) -> ApiResult<web::Json<ShipmentPage>> {
    let ListShipmentsParams {
        user_id,
        status,
        search,
        page,
        limit,
    } = params.into_inner();
    let query = ShipmentListQuery {
        user_id: require_user_id(user_id.as_deref())?,
        filter: ShipmentFilter::new(status, search),
        pagination: require_pagination(page.as_deref(), limit.as_deref())?,
    };
    let page = state.shipments_query.list(&query).await?;
    Ok(web::Json(page))
}

/// Count a user's shipments per status and how many ship express.
#[utoipa::path(
    get,
    path = "/api/shipments/stats",
    params(StatsParams),
    responses(
        (status = 200, description = "Shipment counts", body = ShipmentStatsSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["shipments"],
    operation_id = "shipmentStats"
)]
#[get("/shipments/stats")]
pub async fn shipment_stats(
    state: web::Data<HttpState>,
    params: web::Query<StatsParams>,
) -> ApiResult<web::Json<ShipmentStats>> {
    let user_id = require_user_id(params.user_id.as_deref())?;
    let stats = state.shipments_query.stats(&user_id).await?;
    Ok(web::Json(stats))
}

/// Record a new shipment for a user.
#[utoipa::path(
    post,
    path = "/api/shipments",
    request_body = ShipmentRequest,
    responses(
        (status = 201, description = "Shipment created", body = ShipmentSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["shipments"],
    operation_id = "createShipment"
)]
#[post("/shipments")]
pub async fn create_shipment(
    state: web::Data<HttpState>,
    payload: web::Json<ShipmentRequest>,
) -> ApiResult<HttpResponse> {
    let (user_id, details) = payload.into_inner().into_parts()?;
    let shipment = state
        .shipments
        .create(CreateShipmentRequest { user_id, details })
        .await?;
    Ok(HttpResponse::Created().json(shipment))
}

/// Replace the mutable fields of an existing shipment.
#[utoipa::path(
    put,
    path = "/api/shipments/{id}",
    params(("id" = String, Path, description = "Shipment identifier")),
    request_body = ShipmentRequest,
    responses(
        (status = 200, description = "Shipment updated", body = ShipmentSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found for this user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["shipments"],
    operation_id = "updateShipment"
)]
#[put("/shipments/{id}")]
pub async fn update_shipment(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ShipmentRequest>,
) -> ApiResult<web::Json<Shipment>> {
    let id = require_shipment_id(&path.into_inner())?;
    let (user_id, details) = payload.into_inner().into_parts()?;
    let shipment = state
        .shipments
        .update(UpdateShipmentRequest {
            id,
            user_id,
            details,
        })
        .await?;
    Ok(web::Json(shipment))
}

/// Remove a shipment owned by the given user.
#[utoipa::path(
    delete,
    path = "/api/shipments/{id}",
    params(("id" = String, Path, description = "Shipment identifier")),
    request_body = DeleteShipmentBody,
    responses(
        (status = 200, description = "Shipment deleted", body = MessageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found for this user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["shipments"],
    operation_id = "deleteShipment"
)]
#[delete("/shipments/{id}")]
pub async fn delete_shipment(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: Option<web::Json<DeleteShipmentBody>>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = require_shipment_id(&path.into_inner())?;
    let body = payload.map(web::Json::into_inner).unwrap_or_default();
    let user_id = require_user_id(body.user_id.as_deref())?;
    state
        .shipments
        .delete(DeleteShipmentRequest { id, user_id })
        .await?;
    Ok(web::Json(MessageResponse {
        message: "Shipment deleted successfully".to_owned(),
    }))
}

#[cfg(test)]
#[path = "shipments_tests.rs"]
mod tests;
