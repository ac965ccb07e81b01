//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all books
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Create a book
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (author, title, publisher)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&data.author)
        .bind(&data.title)
        .bind(&data.publisher)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Write the fields present in `data`; an empty update only checks existence
    pub async fn update(&self, id: i32, data: &UpdateBook) -> AppResult<()> {
        let Some(query) = update_statement(data) else {
            return self.get_by_id(id).await.map(|_| ());
        };

        let mut builder = sqlx::query_scalar::<_, i32>(&query).bind(id);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.author);
        bind_field!(data.title);
        bind_field!(data.publisher);

        builder
            .fetch_optional(&self.pool)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Delete a book
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        Ok(())
    }
}

/// `UPDATE` for the present fields of `data`, with the id bound as `$1`.
/// Field values follow in declaration order.
fn update_statement(data: &UpdateBook) -> Option<String> {
    let mut sets = Vec::new();
    let mut idx = 2;

    macro_rules! add_field {
        ($field:expr, $name:expr) => {
            if $field.is_some() {
                sets.push(format!("{} = ${}", $name, idx));
                idx += 1;
            }
        };
    }

    add_field!(data.author, "author");
    add_field!(data.title, "title");
    add_field!(data.publisher, "publisher");

    if sets.is_empty() {
        return None;
    }

    Some(format!(
        "UPDATE books SET {} WHERE id = $1 RETURNING id",
        sets.join(", ")
    ))
}
