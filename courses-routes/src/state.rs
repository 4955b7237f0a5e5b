use crate::error::MetricsInitError;
use crate::metrics;
use crate::service::CourseService;
use axum::extract::FromRef;
use courses_core::CourseRepository;
use error_stack::Report;
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct CourseAppState<R> {
    pub service: CourseService<R>,
    pub metrics: Option<PrometheusHandle>,
}

impl<R: CourseRepository> CourseAppState<R> {
    /// Installs the process-wide prometheus recorder, so this can only succeed once per process.
    pub fn new_with_metrics(repo: R) -> Result<Self, Report<MetricsInitError>> {
        Ok(Self {
            service: CourseService::new(repo),
            metrics: Some(metrics::setup_recorder()?),
        })
    }

    pub fn new_without_metrics(repo: R) -> Self {
        Self {
            service: CourseService::new(repo),
            metrics: None,
        }
    }
}

impl<R: Clone> FromRef<CourseAppState<R>> for CourseService<R> {
    fn from_ref(input: &CourseAppState<R>) -> Self {
        input.service.clone()
    }
}
