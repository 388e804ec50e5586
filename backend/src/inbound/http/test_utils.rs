//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::Utc;
use mockable::Clock;
use serde_json::Value;

use crate::Trace;
use crate::inbound::http::configure;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryStore;
use crate::test_support::MutableClock;

/// In-memory application harness with a controllable clock.
pub struct TestApp<S> {
    pub service: S,
    pub clock: Arc<MutableClock>,
}

impl TestApp<()> {
    /// Build the full API over a fresh in-memory store.
    pub async fn start() -> TestApp<
        impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    > {
        Self::with_ports(|_| {}).await
    }

    /// Build the full API, letting the caller swap individual ports for
    /// doubles before the service starts.
    pub async fn with_ports(
        override_ports: impl FnOnce(&mut HttpState),
    ) -> TestApp<
        impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    > {
        let clock = Arc::new(MutableClock::new(Utc::now()));
        let store = Arc::new(InMemoryStore::default());
        let mut state = HttpState::over_store(store, Arc::clone(&clock) as Arc<dyn Clock>);
        override_ports(&mut state);
        let service = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .wrap(Trace)
                .configure(configure),
        )
        .await;
        TestApp { service, clock }
    }
}

/// Send a request and decode the JSON body, yielding `Value::Null` when empty.
pub async fn send<S, B>(app: &TestApp<S>, request: test::TestRequest) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(&app.service, request.to_request()).await;
    let status = response.status();
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is JSON")
    };
    (status, body)
}

pub async fn get_json<S, B>(app: &TestApp<S>, uri: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    send(app, test::TestRequest::get().uri(uri)).await
}

pub async fn post_json<S, B>(app: &TestApp<S>, uri: &str, payload: Value) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    send(app, test::TestRequest::post().uri(uri).set_json(payload)).await
}

pub async fn put_json<S, B>(app: &TestApp<S>, uri: &str, payload: Value) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    send(app, test::TestRequest::put().uri(uri).set_json(payload)).await
}

pub async fn delete_json<S, B>(app: &TestApp<S>, uri: &str, payload: Value) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    send(app, test::TestRequest::delete().uri(uri).set_json(payload)).await
}
