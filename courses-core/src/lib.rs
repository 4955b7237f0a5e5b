use model::{Course, CourseUpdate, NewCourse};
use result::{OptRepoResult, RepoResult};

pub mod id;
pub mod model;
pub mod result;
pub mod validation;

pub use id::CourseId;

/// Access to the store that holds courses.
///
/// Lookups by id take the raw id as it arrived on the request. An id that is not well formed
/// for the store is treated exactly like an id that matches nothing: `Ok(None)`.
/// `Err` is reserved for the store itself failing.
pub trait CourseRepository: Clone + Send + Sync + 'static {
    fn list(&self) -> impl Future<Output = RepoResult<Vec<Course>>> + Send;

    fn get(&self, id: &str) -> impl Future<Output = OptRepoResult<Course>> + Send;

    fn create(&self, new_course: NewCourse) -> impl Future<Output = RepoResult<Course>> + Send;

    fn update(
        &self,
        id: &str,
        update: CourseUpdate,
    ) -> impl Future<Output = OptRepoResult<Course>> + Send;

    /// Removes the course and hands back what was stored.
    fn delete(&self, id: &str) -> impl Future<Output = OptRepoResult<Course>> + Send;
}
