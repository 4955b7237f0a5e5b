use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::borrow::Cow;

pub const COURSE_NOT_FOUND_MESSAGE: &str = "The course with the given ID was not found";

/// Successful responses carry JSON.
#[derive(Debug)]
pub struct CourseResponse<T> {
    status_code: StatusCode,
    body: T,
}

impl<T> CourseResponse<T> {
    pub fn ok(body: T) -> Self {
        Self {
            status_code: StatusCode::OK,
            body,
        }
    }
}

impl<T: Serialize> IntoResponse for CourseResponse<T> {
    fn into_response(self) -> Response {
        (self.status_code, Json(self.body)).into_response()
    }
}

pub type ErrorMessageType = Cow<'static, str>;

/// Error responses carry a plain text message, not JSON.
#[derive(Debug)]
pub struct CourseError {
    status_code: StatusCode,
    message: ErrorMessageType,
}

impl CourseError {
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, COURSE_NOT_FOUND_MESSAGE)
    }

    pub fn bad_request(message: impl Into<ErrorMessageType>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn new(status_code: StatusCode, message: impl Into<ErrorMessageType>) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }
}

impl IntoResponse for CourseError {
    fn into_response(self) -> Response {
        (self.status_code, self.message).into_response()
    }
}
