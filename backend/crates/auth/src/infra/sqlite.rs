//! SQLite Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::migrate::Migrator;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::domain::entity::{session::SessionRecord, user::User};
use crate::domain::repository::{SessionRepository, UserFilter, UserRepository, UserUpdate};
use crate::domain::value_object::{
    email::Email, password_digest::PasswordDigest, session_token::SessionToken, user_id::UserId,
};
use crate::error::{AuthError, AuthResult};

/// Schema for `users` and `user_sessions`
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const USER_COLUMNS: &str =
    "id, email, hashed_password, session_token, reset_token, created_at_ms, updated_at_ms";

/// SQLite-backed credential store and durable session records
#[derive(Clone)]
pub struct SqliteAuthRepository {
    pool: SqlitePool,
}

impl SqliteAuthRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Apply pending migrations
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        MIGRATOR.run(&self.pool).await
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for SqliteAuthRepository {
    async fn find_user(&self, filter: &UserFilter<'_>) -> AuthResult<Option<User>> {
        let (column, value) = match filter {
            UserFilter::Id(id) => ("id", id.to_string()),
            UserFilter::Email(email) => ("email", email.as_str().to_string()),
            UserFilter::SessionToken(token) => ("session_token", token.to_string()),
            UserFilter::ResetToken(token) => ("reset_token", token.to_string()),
        };

        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = ? LIMIT 1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn create_user(&self, email: &Email, digest: &PasswordDigest) -> AuthResult<User> {
        if self.find_user(&UserFilter::Email(email)).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let now = millis_to_datetime(Utc::now().timestamp_millis())?;
        let mut user = User::new(email.clone(), digest.clone());
        user.created_at = now;
        user.updated_at = now;

        sqlx::query(
            r#"
            INSERT INTO users (
                id,
                email,
                hashed_password,
                session_token,
                reset_token,
                created_at_ms,
                updated_at_ms
            ) VALUES (?, ?, ?, NULL, NULL, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(user.email.as_str())
        .bind(user.password_digest.as_str())
        .bind(now.timestamp_millis())
        .bind(now.timestamp_millis())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AuthError::EmailTaken
            } else {
                AuthError::Database(e)
            }
        })?;

        tracing::debug!(user_id = %user.id, "User row inserted");
        Ok(user)
    }

    async fn update_user(&self, user_id: &UserId, update: &UserUpdate) -> AuthResult<()> {
        let mut query = QueryBuilder::<Sqlite>::new("UPDATE users SET updated_at_ms = ");
        query.push_bind(Utc::now().timestamp_millis());

        if let Some(digest) = &update.password_digest {
            query
                .push(", hashed_password = ")
                .push_bind(digest.as_str().to_string());
        }
        if let Some(token) = &update.session_token {
            query.push(", session_token = ").push_bind(token.clone());
        }
        if let Some(token) = &update.reset_token {
            query.push(", reset_token = ").push_bind(token.clone());
        }
        query.push(" WHERE id = ").push_bind(user_id.to_string());

        let affected = query.build().execute(&self.pool).await?.rows_affected();
        if affected == 0 {
            return Err(AuthError::UserNotFound);
        }

        Ok(())
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for SqliteAuthRepository {
    async fn insert(&self, record: &SessionRecord) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO user_sessions (session_token, user_id, created_at_ms)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(record.token.as_str())
        .bind(record.user_id.to_string())
        .bind(record.created_at.timestamp_millis())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, token: &str) -> AuthResult<Option<SessionRecord>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT session_token, user_id, created_at_ms
            FROM user_sessions
            WHERE session_token = ?
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        row.map(SessionRow::into_record).transpose()
    }

    async fn delete(&self, token: &str) -> AuthResult<bool> {
        let affected = sqlx::query("DELETE FROM user_sessions WHERE session_token = ?")
            .bind(token)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    email: String,
    hashed_password: String,
    session_token: Option<String>,
    reset_token: Option<String>,
    created_at_ms: i64,
    updated_at_ms: i64,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let id = self
            .id
            .parse::<UserId>()
            .map_err(|e| AuthError::Internal(format!("Invalid user id: {e}")))?;
        let password_digest = PasswordDigest::from_db(self.hashed_password)
            .map_err(|e| AuthError::Internal(format!("Invalid password digest: {e}")))?;

        Ok(User {
            id,
            email: Email::from_db(self.email),
            password_digest,
            session_token: self.session_token,
            reset_token: self.reset_token,
            created_at: millis_to_datetime(self.created_at_ms)?,
            updated_at: millis_to_datetime(self.updated_at_ms)?,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_token: String,
    user_id: String,
    created_at_ms: i64,
}

impl SessionRow {
    fn into_record(self) -> AuthResult<SessionRecord> {
        let user_id = self
            .user_id
            .parse::<UserId>()
            .map_err(|e| AuthError::Internal(format!("Invalid user id: {e}")))?;

        Ok(SessionRecord::new(
            SessionToken::from_raw(self.session_token),
            user_id,
            millis_to_datetime(self.created_at_ms)?,
        ))
    }
}

fn millis_to_datetime(ms: i64) -> AuthResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| AuthError::Internal(format!("Timestamp out of range: {ms}")))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.kind() == sqlx::error::ErrorKind::UniqueViolation
    )
}
