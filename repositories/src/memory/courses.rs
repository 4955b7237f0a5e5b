use courses_core::model::{Course, CourseUpdate, NewCourse};
use courses_core::result::{OptRepoResult, RepoResult};
use courses_core::{CourseId, CourseRepository};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Process-local store. Courses are listed in id order, which is creation order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCourseRepo {
    courses: Arc<RwLock<BTreeMap<CourseId, Course>>>,
}

impl InMemoryCourseRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

fn course_id(id: &str) -> Option<CourseId> {
    id.parse()
        .inspect_err(|e| debug!("treating as not found: {e}"))
        .ok()
}

impl CourseRepository for InMemoryCourseRepo {
    async fn list(&self) -> RepoResult<Vec<Course>> {
        Ok(self.courses.read().await.values().cloned().collect())
    }

    async fn get(&self, id: &str) -> OptRepoResult<Course> {
        let Some(id) = course_id(id) else {
            return Ok(None);
        };
        Ok(self.courses.read().await.get(&id).cloned())
    }

    async fn create(&self, new_course: NewCourse) -> RepoResult<Course> {
        let course = Course::create(CourseId::generate(), new_course);
        self.courses
            .write()
            .await
            .insert(course.id, course.clone());
        Ok(course)
    }

    async fn update(&self, id: &str, update: CourseUpdate) -> OptRepoResult<Course> {
        let Some(id) = course_id(id) else {
            return Ok(None);
        };

        let mut courses = self.courses.write().await;
        Ok(courses.get_mut(&id).map(|course| {
            course.apply(update);
            course.clone()
        }))
    }

    async fn delete(&self, id: &str) -> OptRepoResult<Course> {
        let Some(id) = course_id(id) else {
            return Ok(None);
        };
        Ok(self.courses.write().await.remove(&id))
    }
}
