//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod error;
pub mod health;
pub mod schemas;
pub mod shipments;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register extractor error handlers and the `/api` routes.
///
/// The caller supplies `web::Data<HttpState>`; health probes are mounted
/// separately because they carry their own state.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use shipment_tracker::inbound::http::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(
            web::scope("/api")
                .service(accounts::signup)
                .service(accounts::login)
                .service(shipments::shipment_stats)
                .service(shipments::list_shipments)
                .service(shipments::create_shipment)
                .service(shipments::update_shipment)
                .service(shipments::delete_shipment),
        );
}
