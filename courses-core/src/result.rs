use error_stack::Report;

pub type RepoResult<T> = Result<T, Report<CourseRepoError>>;
pub type OptRepoResult<T> = Result<Option<T>, Report<CourseRepoError>>;

#[derive(Debug, thiserror::Error)]
pub enum CourseRepoError {
    #[error("failed to get course")]
    Get,
    #[error("failed to list courses")]
    List,
    #[error("failed to create course")]
    Create,
    #[error("failed to update course")]
    Update,
    #[error("failed to delete course")]
    Delete,
}
