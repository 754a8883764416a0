//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ServerConfig, SourceEndpoints};

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use horizon::Trace;
#[cfg(debug_assertions)]
use horizon::doc::ApiDoc;
use horizon::inbound::http::hazards::nearby_hazards;
use horizon::inbound::http::health::{HealthState, live, ready};
use horizon::inbound::http::places::nearby_places;
use horizon::inbound::http::resources::{alert_resource, dispatch_nearest, nearby_resources};
use horizon::inbound::http::state::HttpState;
use horizon::inbound::http::{json_error_handler, query_error_handler};
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

    let api = web::scope("/api/v1")
        .service(nearby_hazards)
        .service(nearby_places)
        .service(nearby_resources)
        .service(alert_resource)
        .service(dispatch_nearest);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is bound.
/// - `config`: pre-built [`ServerConfig`] with binding, feed, store, and
///   optional metrics settings.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when wiring adapters, binding the socket, or
/// starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config)?;
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state,
    };
    let bind_addr = config.bind_addr;

    #[cfg(feature = "metrics")]
    let server = match config.prometheus {
        Some(prometheus) => {
            HttpServer::new(move || build_app(deps.clone()).wrap(prometheus.clone()))
                .bind(bind_addr)?
                .run()
        }
        None => HttpServer::new(move || build_app(deps.clone()))
            .bind(bind_addr)?
            .run(),
    };
    #[cfg(not(feature = "metrics"))]
    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
