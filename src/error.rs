use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaskError>;

/// Everything that can go wrong while operating on the task list.
#[derive(Error, Debug)]
pub enum TaskError {
    /// Numeric input that does not parse as an integer. Carries the
    /// offending text.
    #[error("invalid number: {0:?}")]
    Validation(String),

    /// An operation addressed a row outside the current task list.
    #[error("no task at row {0}")]
    NotFound(usize),

    /// Reading or writing the task file failed.
    #[error("task file error: {0}")]
    Io(#[from] std::io::Error),
}
