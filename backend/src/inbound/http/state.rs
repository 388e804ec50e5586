//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    LoginService, ShipmentCommand, ShipmentQuery, ShipmentRepository, SignupService,
    UserRepository,
};
use crate::domain::{AccountService, ShipmentCommandService, ShipmentQueryService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub signup: Arc<dyn SignupService>,
    pub login: Arc<dyn LoginService>,
    pub shipments: Arc<dyn ShipmentCommand>,
    pub shipments_query: Arc<dyn ShipmentQuery>,
}

impl HttpState {
    /// Wire the domain services over one store implementing both
    /// repository ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use shipment_tracker::inbound::http::state::HttpState;
    /// use shipment_tracker::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::default());
    /// let state = HttpState::over_store(store, Arc::new(DefaultClock));
    /// let _login = state.login.clone();
    /// ```
    pub fn over_store<R>(store: Arc<R>, clock: Arc<dyn Clock>) -> Self
    where
        R: UserRepository + ShipmentRepository + 'static,
    {
        let accounts = Arc::new(AccountService::new(Arc::clone(&store)));
        Self {
            signup: accounts.clone(),
            login: accounts,
            shipments: Arc::new(ShipmentCommandService::new(Arc::clone(&store), clock)),
            shipments_query: Arc::new(ShipmentQueryService::new(store)),
        }
    }
}
