use crate::db::models::{Feedback, NewFeedback, User};
use crate::db::schema::SQLITE_INIT;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;

pub type SqlitePool = Pool<Sqlite>;

/// Open a pool for `database_url`, creating the database file if it is missing.
pub async fn connect(database_url: &str) -> Result<SqlitePool, AppError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
    Ok(pool)
}

#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the schema by executing the bundled DDL. Safe to run on every start.
    pub async fn init_schema(&self) -> Result<(), AppError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Insert a user. Fails with `UsernameTaken` when the username already exists.
    pub async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        is_admin: bool,
    ) -> Result<User, AppError> {
        let created_at = Utc::now();
        let is_admin_i = if is_admin { 1 } else { 0 };
        let result = sqlx::query(
            r#"INSERT INTO users (username, password_hash, is_admin, created_at)
               VALUES (?, ?, ?, ?)"#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(is_admin_i)
        .bind(created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::UsernameTaken
            }
            other => AppError::DatabaseError(other),
        })?;

        Ok(User {
            id: result.last_insert_rowid(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            is_admin,
            created_at,
        })
    }

    /// Session loader: resolve a stored user id back to the full record.
    pub async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let row = sqlx::query(
            r#"SELECT id, username, password_hash, is_admin, created_at
               FROM users WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_user).transpose()
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query(
            r#"SELECT id, username, password_hash, is_admin, created_at
               FROM users WHERE username = ?"#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_user).transpose()
    }

    /// Insert one feedback row for `user_id` inside a single transaction. Returns the row id.
    pub async fn insert_feedback(&self, user_id: i64, fb: NewFeedback) -> Result<i64, AppError> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            r#"INSERT INTO feedback (course, rating, comments, user_id, created_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(fb.course)
        .bind(fb.rating)
        .bind(fb.comments)
        .bind(user_id)
        .bind(Utc::now().to_rfc3339())
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(result.last_insert_rowid())
    }

    /// Every feedback row in storage order, with the submitter's username.
    pub async fn list_feedback(&self) -> Result<Vec<Feedback>, AppError> {
        let rows = sqlx::query(
            r#"SELECT f.id, f.course, f.rating, f.comments, f.user_id, u.username, f.created_at
               FROM feedback f JOIN users u ON u.id = f.user_id
               ORDER BY f.id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_feedback).collect()
    }

    pub async fn count_feedback(&self) -> Result<i64, AppError> {
        let rec: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM feedback")
            .fetch_one(&self.pool)
            .await?;
        Ok(rec.0)
    }

    fn row_to_user(row: SqliteRow) -> Result<User, AppError> {
        let is_admin_i: i64 = row.try_get("is_admin")?;
        let created_at_str: String = row.try_get("created_at")?;
        Ok(User {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            password_hash: row.try_get("password_hash")?,
            is_admin: is_admin_i != 0,
            created_at: parse_timestamp(&created_at_str)?,
        })
    }

    fn row_to_feedback(row: SqliteRow) -> Result<Feedback, AppError> {
        let created_at_str: String = row.try_get("created_at")?;
        Ok(Feedback {
            id: row.try_get("id")?,
            course: row.try_get("course")?,
            rating: row.try_get("rating")?,
            comments: row.try_get("comments")?,
            user_id: row.try_get("user_id")?,
            username: row.try_get("username")?,
            created_at: parse_timestamp(&created_at_str)?,
        })
    }
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, AppError> {
    let ts = DateTime::parse_from_rfc3339(s)
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
        .with_timezone(&Utc);
    Ok(ts)
}
