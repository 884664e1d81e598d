//! Server construction and middleware wiring.

mod config;

pub use config::{ServerConfig, ServerSettings};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
use crate::doc::ApiDoc;
use crate::inbound::http::contact::contact;
use crate::inbound::http::extract;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::home::home;
use crate::inbound::http::login::login;
use crate::inbound::http::people::{create_person, person_detail, show_person, update_person};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::uploads::post_image;

/// Shared state handed to every worker's [`App`].
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub docs_enabled: bool,
}

impl Default for AppDependencies {
    fn default() -> Self {
        Self {
            health_state: web::Data::new(HealthState::new()),
            http_state: web::Data::new(HttpState::default()),
            docs_enabled: false,
        }
    }
}

fn mount_docs(cfg: &mut web::ServiceConfig) {
    cfg.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));
}

/// Assemble the application: extractor configs, shared state, tracing and
/// every route.
///
/// # Examples
/// ```
/// use people_api::server::{AppDependencies, build_app};
///
/// let app = build_app(AppDependencies::default());
/// ```
pub fn build_app(
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
        docs_enabled,
    } = deps;

    App::new()
        .configure(extract::configure)
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(home)
        .service(create_person)
        .service(person_detail)
        .service(show_person)
        .service(update_person)
        .service(login)
        .service(contact)
        .service(post_image)
        .service(ready)
        .service(live)
        .configure(|cfg| {
            if docs_enabled {
                mount_docs(cfg);
            }
        })
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(HttpState::default());
    let ServerConfig {
        bind_addr,
        docs_enabled,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            docs_enabled,
        })
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, docs_enabled, "server listening");
    health_state.mark_ready();
    Ok(server)
}
