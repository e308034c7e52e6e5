use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::task::models::Task;
use crate::domain::task::ports::TaskServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(authenticated_user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<Vec<TaskData>>, ApiError> {
    state
        .task_service
        .list_tasks(&authenticated_user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|tasks| {
            ApiSuccess::new(
                StatusCode::OK,
                "Tasks retrieved successfully",
                tasks.iter().map(TaskData::from).collect(),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskData {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskData {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.0,
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status.clone(),
            completed: task.is_completed(),
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}
