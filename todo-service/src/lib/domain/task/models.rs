use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::UserId;

/// Task owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    /// Free-form status; `"completed"` is the only value with meaning here.
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub const STATUS_COMPLETED: &'static str = "completed";

    pub fn is_completed(&self) -> bool {
        self.status == Self::STATUS_COMPLETED
    }
}

/// Store-assigned task identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub i64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(status: &str) -> Task {
        Task {
            id: TaskId(1),
            user_id: UserId(1),
            title: "Get something done".to_string(),
            description: String::new(),
            status: status.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_completed() {
        assert!(task("completed").is_completed());
        assert!(!task("pending").is_completed());
        assert!(!task("Completed").is_completed());
    }
}
