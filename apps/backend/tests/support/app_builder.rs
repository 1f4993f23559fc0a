use std::sync::Arc;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use catalog_api::adapters::memory::MemoryStore;
use catalog_api::infra::state::build_state;
use catalog_api::middleware::request_trace::RequestTrace;
use catalog_api::middleware::structured_logger::StructuredLogger;
use catalog_api::routes;
use catalog_api::state::app_state::AppState;
use catalog_api::state::security_config::SecurityConfig;

use super::TEST_SECRET;

type RouteConfigFn = Box<dyn Fn(&mut web::ServiceConfig) + Send + Sync>;

/// Builder for creating test Actix service instances
pub struct TestAppBuilder {
    state: AppState,
    route_config: Option<RouteConfigFn>,
}

impl TestAppBuilder {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            route_config: None,
        }
    }

    /// Register the production route table.
    pub fn with_prod_routes(mut self) -> Self {
        self.route_config = Some(Box::new(routes::configure) as RouteConfigFn);
        self
    }

    /// Register custom routes instead.
    pub fn with_routes<F>(mut self, config_fn: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + Send + Sync + 'static,
    {
        self.route_config = Some(Box::new(config_fn) as RouteConfigFn);
        self
    }

    pub async fn build(
        self,
    ) -> impl Service<Request, Response = ServiceResponse, Error = Error> {
        let data = web::Data::new(self.state);
        let route_config = self.route_config;

        test::init_service(
            App::new()
                .wrap(StructuredLogger)
                .wrap(RequestTrace)
                .app_data(data)
                .configure(move |cfg| {
                    if let Some(config_fn) = &route_config {
                        config_fn(cfg);
                    }
                }),
        )
        .await
    }
}

pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder::new(state)
}

/// State with the test secret and the given memory store.
pub async fn memory_state(store: Arc<MemoryStore>) -> AppState {
    build_state()
        .with_security(SecurityConfig::new(TEST_SECRET))
        .with_store(store)
        .build()
        .await
        .expect("state should build")
}
