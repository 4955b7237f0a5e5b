use super::responses::CourseError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use serde_json::Value;
use tracing::debug;
use utoipa::ToSchema;

/// Body accepted by the create and update endpoints.
/// Handlers take the raw JSON and run it through validation, this type only documents it.
#[derive(Debug, ToSchema)]
pub struct CourseRequest {
    /// At least 3 characters long.
    pub name: String,
    /// Cannot be empty when given. Left out on update, the stored description is kept.
    pub description: Option<String>,
}

/// The JSON body, or the reason it could not be read as JSON.
pub fn body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, String> {
    body.map(|Json(payload)| payload).map_err(|rejection| {
        debug!("rejected request body: {rejection}");
        rejection.body_text()
    })
}

/// Like [`body`], with an unreadable body already turned into a plain text `400`.
pub fn payload(body: Result<Json<Value>, JsonRejection>) -> Result<Value, CourseError> {
    self::body(body).map_err(CourseError::bad_request)
}
