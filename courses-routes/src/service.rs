use crate::ServiceResult;
use crate::error::CourseServiceError;
use crate::metrics;
use courses_core::CourseRepository;
use courses_core::model::Course;
use courses_core::validation::{self, ValidCourse, ValidationError};
use error_stack::ResultExt;
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// What came of a request aimed at a single course.
#[derive(Debug, PartialEq, Eq)]
pub enum CourseOutcome {
    Success(Course),
    NotFound,
    Invalid(ValidationError),
    /// The body could not be read as JSON at all.
    Unreadable(String),
}

/// A request body as it arrived: JSON, or why it could not be read as JSON.
pub type RequestBody = Result<Value, String>;

#[derive(Debug, Clone)]
pub struct CourseService<R> {
    repo: R,
}

impl<R> CourseService<R>
where
    R: CourseRepository,
{
    pub fn new(repo: R) -> Self {
        CourseService { repo }
    }

    #[instrument(skip_all, name = "service#list")]
    pub async fn list(&self) -> ServiceResult<Vec<Course>> {
        let courses = self
            .repo
            .list()
            .await
            .change_context(CourseServiceError)?;

        metrics::increment_courses_retrieved_by(courses.len());
        Ok(courses)
    }

    #[instrument(skip(self), name = "service#get")]
    pub async fn get(&self, id: &str) -> ServiceResult<CourseOutcome> {
        let outcome = match self.find(id).await? {
            Some(course) => {
                metrics::increment_courses_retrieved();
                CourseOutcome::Success(course)
            }
            None => CourseOutcome::NotFound,
        };
        Ok(outcome)
    }

    #[instrument(skip_all, name = "service#create")]
    pub async fn create(&self, payload: &Value) -> ServiceResult<CourseOutcome> {
        let course = match validate(payload) {
            Ok(course) => course,
            Err(e) => return Ok(CourseOutcome::Invalid(e)),
        };

        let created = self
            .repo
            .create(course.into_new_course())
            .await
            .change_context(CourseServiceError)?;

        metrics::increment_courses_created();
        debug!("created course {}", created.id);
        Ok(CourseOutcome::Success(created))
    }

    /// Existence is checked before the body is looked at, so an unknown id wins over a bad body.
    #[instrument(skip(self, body), name = "service#update")]
    pub async fn update(&self, id: &str, body: RequestBody) -> ServiceResult<CourseOutcome> {
        if self.find(id).await?.is_none() {
            return Ok(CourseOutcome::NotFound);
        }

        let payload = match body {
            Ok(payload) => payload,
            Err(reason) => return Ok(CourseOutcome::Unreadable(reason)),
        };

        let course = match validate(&payload) {
            Ok(course) => course,
            Err(e) => return Ok(CourseOutcome::Invalid(e)),
        };

        let outcome = match self
            .repo
            .update(id, course.into_update())
            .await
            .change_context(CourseServiceError)?
        {
            Some(updated) => {
                metrics::increment_courses_updated();
                CourseOutcome::Success(updated)
            }
            None => {
                warn!("course {id} disappeared between lookup and update");
                CourseOutcome::NotFound
            }
        };
        Ok(outcome)
    }

    #[instrument(skip(self), name = "service#delete")]
    pub async fn delete(&self, id: &str) -> ServiceResult<CourseOutcome> {
        if self.find(id).await?.is_none() {
            return Ok(CourseOutcome::NotFound);
        }

        let outcome = match self
            .repo
            .delete(id)
            .await
            .change_context(CourseServiceError)?
        {
            Some(deleted) => {
                metrics::increment_courses_deleted();
                CourseOutcome::Success(deleted)
            }
            None => {
                warn!("course {id} disappeared between lookup and delete");
                CourseOutcome::NotFound
            }
        };
        Ok(outcome)
    }

    async fn find(&self, id: &str) -> ServiceResult<Option<Course>> {
        self.repo
            .get(id)
            .await
            .change_context(CourseServiceError)
    }
}

fn validate(payload: &Value) -> Result<ValidCourse, ValidationError> {
    validation::validate(payload).inspect_err(|e| debug!("rejected course payload: {e}"))
}
