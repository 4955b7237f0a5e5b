use axum::http::StatusCode;
use axum::response::IntoResponse;
use error_stack::Report;
use std::error::Error;

/// Failure that escaped an endpoint's own outcome handling, most often a store error.
///
/// Renders as `400 Bad Request` with a plain-text body made of the report's context chain,
/// so the client sees the underlying store message at the end of it.
/// Logging is left to the handler's span (`#[instrument(err(Debug))]`).
#[derive(thiserror::Error)]
#[error("there was an error running the endpoint")]
pub struct EndpointError<T: Error>(Report<T>);

impl<T: Error> EndpointError<T> {
    pub fn message(&self) -> String {
        format!("{:#}", self.0)
    }
}

impl<T: Error> std::fmt::Debug for EndpointError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl<T> From<Report<T>> for EndpointError<T>
where
    T: Error,
{
    fn from(value: Report<T>) -> Self {
        Self(value)
    }
}

impl<T: Error> IntoResponse for EndpointError<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::BAD_REQUEST, self.message()).into_response()
    }
}
