#[derive(Debug, thiserror::Error)]
#[error("course service failed")]
pub struct CourseServiceError;

#[derive(Debug, thiserror::Error)]
#[error("failed to install the prometheus recorder")]
pub struct MetricsInitError;
