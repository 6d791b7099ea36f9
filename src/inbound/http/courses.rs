//! Course catalog API handlers.
//!
//! ```text
//! POST /api/v1/courses {"name":"Rust Fundamentals","price":299.99}
//! GET /api/v1/courses?name=rust&minPrice=100&maxPrice=500
//! PATCH /api/v1/courses/1/discount?percentage=10
//! ```
//!
//! Handlers validate wire input here, before anything reaches the catalog
//! service: required fields are reported together, then every field
//! constraint violation is collected into one `invalid_request` payload.

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::CourseFilter;
use crate::domain::{Course, CourseDraft, CourseFieldError, CourseId, CourseValidationError, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Course payload for `POST /api/v1/courses` and `PUT /api/v1/courses/{id}`.
///
/// Example JSON:
/// `{"name":"Rust Fundamentals","price":299.99,"description":"Learn Rust"}`
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequest {
    /// Course name, 2 to 100 characters.
    pub name: Option<String>,
    /// Positive price with at most two decimal places. Accepts a JSON
    /// number or a string.
    #[schema(value_type = f64, example = 299.99)]
    pub price: Option<Decimal>,
    /// Optional description, up to 500 characters.
    pub description: Option<String>,
}

/// Course representation returned by every read and write endpoint.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    /// Repository-assigned identifier.
    pub id: i64,
    pub name: String,
    /// Serialized as a decimal string to keep the exact scale.
    #[schema(value_type = String, example = "299.99")]
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the price is strictly above 1000.
    pub expensive: bool,
}

impl TryFrom<Course> for CourseResponse {
    type Error = Error;

    fn try_from(course: Course) -> Result<Self, Error> {
        let id = course
            .id()
            .ok_or_else(|| Error::internal("persisted course is missing an identifier"))?;
        Ok(Self {
            id: id.get(),
            expensive: course.is_expensive(),
            name: course.name().to_owned(),
            price: course.price(),
            description: course.description().map(ToOwned::to_owned),
        })
    }
}

/// Optional filters for `GET /api/v1/courses`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListCoursesParams {
    /// Case-insensitive name substring.
    pub name: Option<String>,
    /// Inclusive lower price bound.
    #[param(value_type = Option<f64>)]
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    #[param(value_type = Option<f64>)]
    pub max_price: Option<Decimal>,
}

impl From<ListCoursesParams> for CourseFilter {
    fn from(params: ListCoursesParams) -> Self {
        Self {
            name: params.name,
            min_price: params.min_price,
            max_price: params.max_price,
        }
    }
}

/// Discount parameters for `PATCH /api/v1/courses/{id}/discount`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DiscountParams {
    /// Percentage in `(0, 100]`.
    #[param(value_type = f64, example = 10.0)]
    pub percentage: Option<Decimal>,
}

fn map_validation_error(err: CourseValidationError) -> Error {
    let fields: Vec<_> = err.errors().iter().map(CourseFieldError::field).collect();
    Error::invalid_request(err.to_string()).with_details(json!({ "fields": fields }))
}

fn draft_from_request(request: CourseRequest) -> Result<CourseDraft, Error> {
    let CourseRequest {
        name,
        price,
        description,
    } = request;
    match (name, price) {
        (Some(name), Some(price)) => {
            CourseDraft::new(name, price, description).map_err(map_validation_error)
        }
        (name, price) => {
            let mut missing = Vec::new();
            if name.is_none() {
                missing.push("name");
            }
            if price.is_none() {
                missing.push("price");
            }
            let message = missing
                .iter()
                .map(|field| format!("{field} is required"))
                .collect::<Vec<_>>()
                .join(", ");
            Err(Error::invalid_request(message).with_details(json!({ "fields": missing })))
        }
    }
}

/// Create a course.
#[utoipa::path(
    post,
    path = "/api/v1/courses",
    request_body = CourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["courses"],
    operation_id = "createCourse"
)]
#[post("/courses")]
pub async fn create_course(
    state: web::Data<HttpState>,
    payload: web::Json<CourseRequest>,
) -> ApiResult<HttpResponse> {
    let draft = draft_from_request(payload.into_inner())?;
    let created = state.courses.create_course(draft).await?;
    Ok(HttpResponse::Created().json(CourseResponse::try_from(created)?))
}

/// List courses, optionally filtered by name substring and price bounds.
#[utoipa::path(
    get,
    path = "/api/v1/courses",
    params(ListCoursesParams),
    responses(
        (status = 200, description = "Courses", body = [CourseResponse]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["courses"],
    operation_id = "listCourses"
)]
#[get("/courses")]
pub async fn list_courses(
    state: web::Data<HttpState>,
    params: web::Query<ListCoursesParams>,
) -> ApiResult<web::Json<Vec<CourseResponse>>> {
    let courses = state
        .courses_query
        .list_courses(params.into_inner().into())
        .await?;
    let responses = courses
        .into_iter()
        .map(CourseResponse::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(web::Json(responses))
}

/// Fetch one course by id.
#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}",
    params(("id" = i64, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Course", body = CourseResponse),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["courses"],
    operation_id = "getCourse"
)]
#[get("/courses/{id}")]
pub async fn get_course(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<CourseResponse>> {
    let id = CourseId::new(path.into_inner());
    let course = state
        .courses_query
        .get_course(id)
        .await?
        .ok_or_else(|| Error::not_found(format!("course {id} not found")))?;
    Ok(web::Json(CourseResponse::try_from(course)?))
}

/// Replace a course's name, price, and description.
#[utoipa::path(
    put,
    path = "/api/v1/courses/{id}",
    params(("id" = i64, Path, description = "Course identifier")),
    request_body = CourseRequest,
    responses(
        (status = 200, description = "Updated course", body = CourseResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["courses"],
    operation_id = "updateCourse"
)]
#[put("/courses/{id}")]
pub async fn update_course(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<CourseRequest>,
) -> ApiResult<web::Json<CourseResponse>> {
    let id = CourseId::new(path.into_inner());
    let draft = draft_from_request(payload.into_inner())?;
    let updated = state.courses.update_course(id, draft).await?;
    Ok(web::Json(CourseResponse::try_from(updated)?))
}

/// Delete a course.
#[utoipa::path(
    delete,
    path = "/api/v1/courses/{id}",
    params(("id" = i64, Path, description = "Course identifier")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["courses"],
    operation_id = "deleteCourse"
)]
#[delete("/courses/{id}")]
pub async fn delete_course(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = CourseId::new(path.into_inner());
    if state.courses.delete_course(id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(Error::not_found(format!("course {id} not found")))
    }
}

/// Apply a percentage discount to a course's price.
#[utoipa::path(
    patch,
    path = "/api/v1/courses/{id}/discount",
    params(("id" = i64, Path, description = "Course identifier"), DiscountParams),
    responses(
        (status = 200, description = "Discounted course", body = CourseResponse),
        (status = 400, description = "Percentage missing or out of range", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["courses"],
    operation_id = "applyDiscount"
)]
#[patch("/courses/{id}/discount")]
pub async fn apply_discount(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    params: web::Query<DiscountParams>,
) -> ApiResult<web::Json<CourseResponse>> {
    let id = CourseId::new(path.into_inner());
    let percentage = params
        .into_inner()
        .percentage
        .ok_or_else(|| Error::invalid_request("percentage is required"))?;
    let course = state.courses.apply_discount(id, percentage).await?;
    Ok(web::Json(CourseResponse::try_from(course)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockCourseCatalogCommand, MockCourseCatalogQuery};
    use actix_web::{App, http::StatusCode, test as actix_test};
    use rust_decimal_macros::dec;
    use serde_json::Value;
    use std::sync::Arc;

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().app_data(web::Data::new(state)).service(
            web::scope("/api/v1")
                .service(create_course)
                .service(list_courses)
                .service(get_course)
                .service(update_course)
                .service(delete_course)
                .service(apply_discount),
        )
    }

    fn stored(id: i64, name: &str, price: Decimal) -> Course {
        let draft = CourseDraft::new(name, price, None).expect("valid draft");
        Course::from_draft(draft).with_id(CourseId::new(id))
    }

    #[actix_web::test]
    async fn create_returns_created_with_camel_case_body() {
        let mut command = MockCourseCatalogCommand::new();
        command.expect_create_course().times(1).return_once(|draft| {
            Ok(Course::from_draft(draft).with_id(CourseId::new(1)))
        });
        let state = HttpState::new(Arc::new(command), Arc::new(MockCourseCatalogQuery::new()));
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/courses")
            .set_json(json!({
                "name": "Rust Fundamentals",
                "price": 299.99,
                "description": "Learn Rust from scratch"
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value.get("id").and_then(Value::as_i64), Some(1));
        assert_eq!(value.get("price").and_then(Value::as_str), Some("299.99"));
        assert_eq!(value.get("expensive").and_then(Value::as_bool), Some(false));
        assert!(value.get("is_expensive").is_none());
    }

    #[actix_web::test]
    async fn create_reports_missing_fields_together() {
        let state = HttpState::new(
            Arc::new(MockCourseCatalogCommand::new()),
            Arc::new(MockCourseCatalogQuery::new()),
        );
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/courses")
            .set_json(json!({ "description": "no name, no price" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some("name is required, price is required")
        );
        assert_eq!(
            value.get("code").and_then(Value::as_str),
            Some("invalid_request")
        );
        let fields = value["details"]["fields"].as_array().expect("fields list");
        assert_eq!(fields.len(), 2);
    }

    #[actix_web::test]
    async fn create_joins_all_constraint_violations() {
        let state = HttpState::new(
            Arc::new(MockCourseCatalogCommand::new()),
            Arc::new(MockCourseCatalogQuery::new()),
        );
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/courses")
            .set_json(json!({ "name": "x", "price": -1 }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let value: Value = actix_test::read_body_json(response).await;
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .expect("message");
        assert!(message.contains("course name must be between"));
        assert!(message.contains("course price must be greater than 0"));
    }

    #[actix_web::test]
    async fn get_unknown_id_maps_to_not_found() {
        let mut query = MockCourseCatalogQuery::new();
        query.expect_get_course().times(1).return_once(|_| Ok(None));
        let state = HttpState::new(Arc::new(MockCourseCatalogCommand::new()), Arc::new(query));
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/v1/courses/42")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some("course 42 not found")
        );
    }

    #[actix_web::test]
    async fn list_passes_filters_through() {
        let mut query = MockCourseCatalogQuery::new();
        query
            .expect_list_courses()
            .withf(|filter: &CourseFilter| {
                filter.name.as_deref() == Some("rust")
                    && filter.min_price == Some(dec!(100))
                    && filter.max_price == Some(dec!(500))
            })
            .times(1)
            .return_once(|_| Ok(vec![stored(1, "Rust Fundamentals", dec!(299.99))]));
        let state = HttpState::new(Arc::new(MockCourseCatalogCommand::new()), Arc::new(query));
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/v1/courses?name=rust&minPrice=100&maxPrice=500")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let value: Value = actix_test::read_body_json(response).await;
        let list = value.as_array().expect("array");
        assert_eq!(list.len(), 1);
        assert_eq!(
            list[0].get("name").and_then(Value::as_str),
            Some("Rust Fundamentals")
        );
    }

    #[actix_web::test]
    async fn delete_maps_success_to_no_content() {
        let mut command = MockCourseCatalogCommand::new();
        command
            .expect_delete_course()
            .times(1)
            .return_once(|_| Ok(true));
        let state = HttpState::new(Arc::new(command), Arc::new(MockCourseCatalogQuery::new()));
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::delete()
            .uri("/api/v1/courses/1")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn delete_maps_absence_to_not_found() {
        let mut command = MockCourseCatalogCommand::new();
        command
            .expect_delete_course()
            .times(1)
            .return_once(|_| Ok(false));
        let state = HttpState::new(Arc::new(command), Arc::new(MockCourseCatalogQuery::new()));
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::delete()
            .uri("/api/v1/courses/9")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn discount_requires_a_percentage() {
        let state = HttpState::new(
            Arc::new(MockCourseCatalogCommand::new()),
            Arc::new(MockCourseCatalogQuery::new()),
        );
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::patch()
            .uri("/api/v1/courses/1/discount")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some("percentage is required")
        );
    }

    #[actix_web::test]
    async fn discount_returns_the_updated_course() {
        let mut command = MockCourseCatalogCommand::new();
        command
            .expect_apply_discount()
            .withf(|id: &CourseId, percentage: &Decimal| {
                *id == CourseId::new(3) && *percentage == dec!(10)
            })
            .times(1)
            .return_once(|_, _| Ok(stored(3, "Rust Fundamentals", dec!(900))));
        let state = HttpState::new(Arc::new(command), Arc::new(MockCourseCatalogQuery::new()));
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::patch()
            .uri("/api/v1/courses/3/discount?percentage=10")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value.get("price").and_then(Value::as_str), Some("900"));
    }

    #[test]
    fn request_accepts_string_prices() {
        let request: CourseRequest =
            serde_json::from_value(json!({ "name": "Rust Fundamentals", "price": "299.99" }))
                .expect("deserializes");
        assert_eq!(request.price, Some(dec!(299.99)));
    }
}
