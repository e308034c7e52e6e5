use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::SqlitePool;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    email: String,
    first_name: String,
    last_name: String,
    picture_url: Option<String>,
    password_hash: String,
    oauth_user: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = EmailAddress::new(row.email)
            .map_err(|e| UserError::DatabaseError(format!("Corrupt email for user {}: {}", row.id, e)))?;

        Ok(User {
            id: UserId(row.id),
            email,
            first_name: row.first_name,
            last_name: row.last_name,
            picture_url: row.picture_url,
            password_hash: row.password_hash,
            oauth_user: row.oauth_user,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO users (email, first_name, last_name, picture_url, password_hash, oauth_user, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.profile.email.as_str())
        .bind(&user.profile.first_name)
        .bind(&user.profile.last_name)
        .bind(&user.picture_url)
        .bind(&user.password_hash)
        .bind(user.oauth_user)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                // email is the only unique column besides the rowid
                if db_err.is_unique_violation() {
                    return UserError::EmailAlreadyExists(user.profile.email.as_str().to_string());
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        tracing::debug!(user_id = result.last_insert_rowid(), "User row inserted");

        Ok(User {
            id: UserId(result.last_insert_rowid()),
            email: user.profile.email,
            first_name: user.profile.first_name,
            last_name: user.profile.last_name,
            picture_url: user.picture_url,
            password_hash: user.password_hash,
            oauth_user: user.oauth_user,
            created_at: now,
            updated_at: now,
        })
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, first_name, last_name, picture_url, password_hash, oauth_user, created_at, updated_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, first_name, last_name, picture_url, password_hash, oauth_user, created_at, updated_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }
}
