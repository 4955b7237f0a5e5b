use error_stack::Report;

pub mod memory;
pub mod mongo;

pub type RepoInitResult<T> = Result<T, Report<RepoInitErr>>;

#[derive(Debug, thiserror::Error)]
#[error("failed to initialize repository")]
pub struct RepoInitErr;

pub enum ConnectionDetails {
    Url(String),
}
