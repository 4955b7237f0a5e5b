use crate::error::CourseServiceError;
use error_stack::Report;

pub type ServiceResult<T> = Result<T, Report<CourseServiceError>>;
pub mod error;
mod metrics;
pub mod routes;
pub mod service;
pub mod state;
