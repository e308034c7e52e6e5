use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::task::errors::TaskError;
use crate::domain::task::models::Task;
use crate::domain::task::ports::TaskRepository;
use crate::domain::task::ports::TaskServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for task operations.
pub struct TaskService<TR>
where
    TR: TaskRepository,
{
    repository: Arc<TR>,
}

impl<TR> TaskService<TR>
where
    TR: TaskRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<TR> TaskServicePort for TaskService<TR>
where
    TR: TaskRepository,
{
    async fn list_tasks(&self, owner: &UserId) -> Result<Vec<Task>, TaskError> {
        let tasks = self.repository.list_for_user(owner).await?;
        tracing::debug!(user_id = %owner, count = tasks.len(), "Tasks listed");
        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::task::models::TaskId;

    mock! {
        pub TestTaskRepository {}

        #[async_trait]
        impl TaskRepository for TestTaskRepository {
            async fn list_for_user(&self, owner: &UserId) -> Result<Vec<Task>, TaskError>;
        }
    }

    #[tokio::test]
    async fn test_list_tasks_scoped_to_owner() {
        let mut repository = MockTestTaskRepository::new();

        repository
            .expect_list_for_user()
            .withf(|owner| *owner == UserId(3))
            .times(1)
            .returning(|owner| {
                Ok(vec![Task {
                    id: TaskId(1),
                    user_id: *owner,
                    title: "Get something done".to_string(),
                    description: String::new(),
                    status: "pending".to_string(),
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                }])
            });

        let service = TaskService::new(Arc::new(repository));

        let tasks = service.list_tasks(&UserId(3)).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].user_id, UserId(3));
    }

    #[tokio::test]
    async fn test_list_tasks_database_error() {
        let mut repository = MockTestTaskRepository::new();

        repository
            .expect_list_for_user()
            .times(1)
            .returning(|_| Err(TaskError::DatabaseError("no such table".to_string())));

        let service = TaskService::new(Arc::new(repository));

        let result = service.list_tasks(&UserId(3)).await;
        assert!(matches!(result, Err(TaskError::DatabaseError(_))));
    }
}
