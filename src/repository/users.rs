//! Users repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::user::{User, UserRow},
};

/// Columns of a user joined with its book, `u` and `b` aliased
const USER_COLUMNS: &str = r#"
    u.id, u.username, u.name, u.book_id,
    b.id AS book_ref_id, b.author AS book_author,
    b.title AS book_title, b.publisher AS book_publisher
"#;

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all users with their books
    pub async fn list(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users u LEFT JOIN books b ON b.id = u.book_id ORDER BY u.id",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    /// Get user by ID with its book
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users u LEFT JOIN books b ON b.id = u.book_id WHERE u.id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(User::from)
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Insert a user and return it with its book, in one statement
    pub async fn create(&self, username: &str, name: &str, book_id: Option<i32>) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            WITH u AS (
                INSERT INTO users (username, name, book_id)
                VALUES ($1, $2, $3)
                RETURNING *
            )
            SELECT {} FROM u LEFT JOIN books b ON b.id = u.book_id
            "#,
            USER_COLUMNS
        ))
        .bind(username)
        .bind(name)
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(User::from(row))
    }
}
