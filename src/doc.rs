//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (courses, health)
//! - **Schemas**: Wire payloads for courses and the shared error envelope
//!
//! The generated specification is served by Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::courses::{CourseRequest, CourseResponse};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Course catalog API",
        description = "CRUD interface for the course catalog, with discount application and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::courses::create_course,
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::get_course,
        crate::inbound::http::courses::update_course,
        crate::inbound::http::courses::delete_course,
        crate::inbound::http::courses::apply_discount,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(CourseRequest, CourseResponse, Error, ErrorCode)),
    tags(
        (name = "courses", description = "Operations on the course catalog"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
