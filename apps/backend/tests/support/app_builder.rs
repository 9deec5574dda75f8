use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use larder::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use larder::routes;
use larder::state::app_state::AppState;

type RouteConfigFn = Box<dyn Fn(&mut web::ServiceConfig) + Send + Sync>;

/// Builder for test services wired with the production middleware stack.
pub struct TestAppBuilder {
    state: AppState,
    route_config: RouteConfigFn,
}

impl TestAppBuilder {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            route_config: Box::new(routes::configure),
        }
    }

    /// Replace the production routes, e.g. to mount a single probe handler.
    pub fn with_routes<F>(mut self, config_fn: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + Send + Sync + 'static,
    {
        self.route_config = Box::new(config_fn);
        self
    }

    pub async fn build(
        self,
    ) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
        let data = web::Data::new(self.state);
        let route_config = self.route_config;

        test::init_service(
            App::new()
                .wrap(StructuredLogger)
                .wrap(TraceSpan)
                .wrap(RequestTrace)
                .app_data(data)
                .configure(move |cfg| route_config(cfg)),
        )
        .await
    }
}

/// ```ignore
/// let state = test_state().await;
/// let app = create_test_app(state).build().await;
/// ```
pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder::new(state)
}
