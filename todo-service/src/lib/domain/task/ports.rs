use async_trait::async_trait;

use crate::domain::task::errors::TaskError;
use crate::domain::task::models::Task;
use crate::domain::user::models::UserId;

/// Port for task domain service operations.
#[async_trait]
pub trait TaskServicePort: Send + Sync + 'static {
    /// List tasks owned by a user, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_tasks(&self, owner: &UserId) -> Result<Vec<Task>, TaskError>;
}

/// Persistence operations for tasks.
#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    /// Retrieve all tasks owned by a user, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_for_user(&self, owner: &UserId) -> Result<Vec<Task>, TaskError>;
}
