//! Service entry-point: wires the in-memory catalog, REST endpoints, and OpenAPI docs.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use course_catalog::domain::CourseCatalogService;
use course_catalog::inbound::http::health::HealthState;
use course_catalog::inbound::http::state::HttpState;
use course_catalog::outbound::persistence::InMemoryCourseRepository;
use course_catalog::server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_env()?;

    let repository = Arc::new(InMemoryCourseRepository::new());
    let service = Arc::new(CourseCatalogService::new(repository));
    let http_state = HttpState::new(service.clone(), service);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, http_state, config)?;
    server.await
}
