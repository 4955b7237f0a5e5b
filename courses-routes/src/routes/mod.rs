use crate::error::CourseServiceError;
use crate::metrics;
use crate::service::{CourseOutcome, CourseService};
use crate::state::CourseAppState;
use axum::extract::rejection::JsonRejection;
use axum::middleware;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response, Result},
    routing::{get, post},
};
use courses_core::CourseRepository;
use courses_core::model::Course;
use engine::error::EndpointError;
use requests::{CourseRequest, payload};
use responses::{CourseError, CourseResponse};
use serde_json::Value;
use tracing::{info, instrument};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

mod requests;
mod responses;

pub use responses::COURSE_NOT_FOUND_MESSAGE;

pub const COURSE_ROOT_PATH: &str = "/api/courses";
pub const API_DOCS_PATH: &str = "/api/courses/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    nest(
        (path = COURSE_ROOT_PATH, api = CourseDocs),
    )
)]
struct ApiDoc;

#[derive(OpenApi)]
#[openapi(paths(
    list_courses,
    get_course,
    create_course,
    update_course,
    delete_course,
))]
struct CourseDocs;

const COURSE_LIST_PATH: &str = "/";
const COURSE_LIST_TRAILING_SLASH_PATH: &str = "/api/courses/";
const COURSE_CREATE_PATH: &str = "/add";
const COURSE_ID_PATH: &str = "/{course_id}";
const METRICS_PATH: &str = "/metrics";

pub fn build<R: CourseRepository>(app_state: CourseAppState<R>) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(routes(app_state))
        .split_for_parts();

    router.route(
        API_DOCS_PATH,
        get(move || {
            let api = api.clone();
            async move { Json(api) }
        }),
    )
}

fn routes<S, R: CourseRepository>(app_state: CourseAppState<R>) -> OpenApiRouter<S> {
    let main_router = OpenApiRouter::new()
        .route(COURSE_LIST_PATH, get(list_courses::<R>))
        .route(
            COURSE_CREATE_PATH,
            post(create_course::<R>).fallback(course_not_found),
        )
        .route(
            COURSE_ID_PATH,
            get(get_course::<R>)
                .put(update_course::<R>)
                .delete(delete_course::<R>),
        );

    let router = match app_state.metrics.clone() {
        Some(handle) => {
            info!("metrics enabled, setting up metrics handler");
            main_router
                .route(
                    METRICS_PATH,
                    get(move || {
                        let handle = handle.clone();
                        async move { handle.render() }
                    })
                    .fallback(course_not_found),
                )
                .route_layer(middleware::from_fn(metrics::track_http))
        }
        None => {
            info!("metrics not enabled, setting up service unavailable metrics handler");
            main_router.route(
                METRICS_PATH,
                get(|| async {
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "Metrics endpoint is disabled. Metrics must be enabled and the service restarted",
                    )
                })
                .fallback(course_not_found),
            )
        }
    };

    // nesting only matches the root without a trailing slash
    OpenApiRouter::new()
        .nest(COURSE_ROOT_PATH, router)
        .route(COURSE_LIST_TRAILING_SLASH_PATH, get(list_courses::<R>))
        .with_state(app_state)
}

/// Static segments under the root double as course ids for the methods they don't serve.
async fn course_not_found() -> CourseError {
    CourseError::not_found()
}

fn outcome_response(outcome: CourseOutcome) -> Response {
    match outcome {
        CourseOutcome::Success(course) => CourseResponse::ok(course).into_response(),
        CourseOutcome::NotFound => CourseError::not_found().into_response(),
        CourseOutcome::Invalid(e) => CourseError::bad_request(e.to_string()).into_response(),
        CourseOutcome::Unreadable(reason) => CourseError::bad_request(reason).into_response(),
    }
}

/// List every course.
#[utoipa::path(
    get,
    path = COURSE_LIST_PATH,
    responses(
        (status = OK, description = "All stored courses, an empty array if there are none", body = Vec<Course>),
        (status = BAD_REQUEST, description = "The store failed", body = String, content_type = "text/plain"),
    )
)]
#[instrument(skip(service), err(Debug))]
pub async fn list_courses<R>(
    State(service): State<CourseService<R>>,
) -> Result<Response, EndpointError<CourseServiceError>>
where
    R: CourseRepository,
{
    let courses = service.list().await?;
    Ok(CourseResponse::ok(courses).into_response())
}

/// Get the course associated with the given id.
#[utoipa::path(
    get,
    path = COURSE_ID_PATH,
    responses(
        (status = OK, description = "A course matched the given id", body = Course),
        (status = NOT_FOUND, description = "No course matched the given id, or the id is malformed", body = String, content_type = "text/plain"),
        (status = BAD_REQUEST, description = "The store failed", body = String, content_type = "text/plain"),
    ),
    params(
        ("course_id" = String, Path, description = "The id of the course to find"),
    )
)]
#[instrument(skip(service), err(Debug))]
pub async fn get_course<R>(
    State(service): State<CourseService<R>>,
    Path(course_id): Path<String>,
) -> Result<Response, EndpointError<CourseServiceError>>
where
    R: CourseRepository,
{
    Ok(outcome_response(service.get(&course_id).await?))
}

/// Create a new course and return it, including its generated id and creation time.
#[utoipa::path(
    post,
    path = COURSE_CREATE_PATH,
    responses(
        (status = OK, description = "The course was created", body = Course),
        (status = BAD_REQUEST, description = "The body failed validation or the store failed", body = String, content_type = "text/plain"),
    ),
    request_body = CourseRequest
)]
#[instrument(skip_all, err(Debug))]
pub async fn create_course<R>(
    State(service): State<CourseService<R>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, EndpointError<CourseServiceError>>
where
    R: CourseRepository,
{
    let payload = match payload(body) {
        Ok(payload) => payload,
        Err(e) => return Ok(e.into_response()),
    };

    Ok(outcome_response(service.create(&payload).await?))
}

/// Replace the name and description of the course associated with the given id.
/// A description left out of the body keeps its stored value.
#[utoipa::path(
    put,
    path = COURSE_ID_PATH,
    responses(
        (status = OK, description = "The course was updated", body = Course),
        (status = NOT_FOUND, description = "No course matched the given id, or the id is malformed", body = String, content_type = "text/plain"),
        (status = BAD_REQUEST, description = "The body failed validation or the store failed", body = String, content_type = "text/plain"),
    ),
    params(
        ("course_id" = String, Path, description = "The id of the course to update")
    ),
    request_body = CourseRequest,
)]
#[instrument(skip(service, body), err(Debug))]
pub async fn update_course<R>(
    State(service): State<CourseService<R>>,
    Path(course_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, EndpointError<CourseServiceError>>
where
    R: CourseRepository,
{
    Ok(outcome_response(
        service.update(&course_id, requests::body(body)).await?,
    ))
}

/// Delete the course associated with the given id and return what was stored.
#[utoipa::path(
    delete,
    path = COURSE_ID_PATH,
    responses(
        (status = OK, description = "The course was deleted", body = Course),
        (status = NOT_FOUND, description = "No course matched the given id, or the id is malformed", body = String, content_type = "text/plain"),
        (status = BAD_REQUEST, description = "The store failed", body = String, content_type = "text/plain"),
    ),
    params(
        ("course_id" = String, Path, description = "The id of the course to delete")
    )
)]
#[instrument(skip(service), err(Debug))]
pub async fn delete_course<R>(
    State(service): State<CourseService<R>>,
    Path(course_id): Path<String>,
) -> Result<Response, EndpointError<CourseServiceError>>
where
    R: CourseRepository,
{
    Ok(outcome_response(service.delete(&course_id).await?))
}
