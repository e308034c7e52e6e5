pub mod task;
pub mod user;

pub use task::SqliteTaskRepository;
pub use user::SqliteUserRepository;
