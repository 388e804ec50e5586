//! Server construction and middleware wiring.

mod config;

pub use config::{ServerConfig, ServerSettings};

use std::io;
use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::{error, info};

use shipment_tracker::Trace;
#[cfg(debug_assertions)]
use shipment_tracker::doc::ApiDoc;
use shipment_tracker::inbound::http::configure;
use shipment_tracker::inbound::http::health::{HealthState, live, ready};
use shipment_tracker::inbound::http::state::HttpState;
use shipment_tracker::outbound::json_store::JsonStore;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Open the data store and construct an Actix HTTP server over it.
///
/// Readiness is only signalled once the data file loads; a corrupt file is
/// logged and keeps the instance out of rotation without stopping it.
///
/// # Errors
/// Propagates [`std::io::Error`] when the data directory cannot be opened or
/// binding the socket fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> io::Result<Server> {
    let ServerConfig {
        bind_addr,
        data_file,
    } = config;
    let store = JsonStore::open(&data_file)
        .map_err(|err| io::Error::other(format!("failed to open data file {data_file}: {err}")))?;
    let store = Arc::new(store);
    let http_state = web::Data::new(HttpState::over_store(
        Arc::clone(&store),
        Arc::new(DefaultClock),
    ));

    let readiness = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    match store.load().await {
        Ok(document) => {
            info!(
                path = %store.path(),
                users = document.users.len(),
                shipments = document.shipments.len(),
                "data store loaded"
            );
            readiness.mark_ready();
        }
        Err(err) => {
            error!(path = %store.path(), error = %err, "data store failed to load");
        }
    }
    info!(addr = %bind_addr, "listening");
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use shipment_tracker::outbound::memory::InMemoryStore;
    use shipment_tracker::test_support::data_file::TempDataFile;

    fn memory_deps() -> AppDependencies {
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: web::Data::new(HttpState::over_store(
                Arc::new(InMemoryStore::default()),
                Arc::new(DefaultClock),
            )),
        }
    }

    #[actix_web::test]
    async fn app_serves_api_and_probes() {
        let deps = memory_deps();
        deps.health_state.mark_ready();
        let app = test::init_service(build_app(deps)).await;

        let ready_resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        let listed = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/shipments?userId=u1")
                .to_request(),
        )
        .await;

        assert_eq!(ready_resp.status(), StatusCode::OK);
        assert_eq!(listed.status(), StatusCode::OK);
    }

    #[cfg(debug_assertions)]
    #[actix_web::test]
    async fn openapi_document_is_served_in_debug_builds() {
        let app = test::init_service(build_app(memory_deps())).await;

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api-docs/openapi.json")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    fn local_config(data: &TempDataFile) -> ServerConfig {
        ServerConfig {
            bind_addr: "127.0.0.1:0".parse().expect("loopback address"),
            data_file: data.path().to_owned(),
        }
    }

    #[actix_web::test]
    async fn readiness_waits_for_a_loadable_store() {
        let data = TempDataFile::new().expect("temp data file");
        let health_state = web::Data::new(HealthState::new());

        let server = create_server(health_state.clone(), local_config(&data))
            .await
            .expect("server starts");
        let handle = server.handle();
        actix_web::rt::spawn(server);
        handle.stop(false).await;

        assert!(health_state.is_ready());
    }

    #[actix_web::test]
    async fn corrupt_store_withholds_readiness() {
        let data = TempDataFile::new().expect("temp data file");
        data.write("{ not json").expect("seed corrupt file");
        let health_state = web::Data::new(HealthState::new());

        let server = create_server(health_state.clone(), local_config(&data))
            .await
            .expect("server starts");
        let handle = server.handle();
        actix_web::rt::spawn(server);
        handle.stop(false).await;

        assert!(!health_state.is_ready());
        assert!(health_state.is_alive());
    }
}
