use thiserror::Error;

/// Error for task operations
#[derive(Debug, Clone, Error)]
pub enum TaskError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}
