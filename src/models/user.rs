//! User model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::book::Book;
use crate::migration::{ColumnDef, ForeignKeyDef, SqlType, TableDef};

pub const USERS_TABLE: TableDef = TableDef {
    name: "users",
    columns: &[
        ColumnDef::primary_key("id"),
        ColumnDef::required("username", SqlType::Text, "''"),
        ColumnDef::required("name", SqlType::Text, "''"),
        ColumnDef::nullable("book_id", SqlType::Integer),
    ],
    foreign_keys: &[ForeignKeyDef {
        name: "fk_users_book",
        column: "book_id",
        references_table: "books",
        references_column: "id",
    }],
};

/// User with its book resolved
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,
    pub name: String,
    /// Referenced book id, 0 when unset
    pub book_id: i32,
    pub book: Option<Book>,
}

/// Flat row of `users LEFT JOIN books`
#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: i32,
    pub username: String,
    pub name: String,
    pub book_id: Option<i32>,
    pub book_ref_id: Option<i32>,
    pub book_author: Option<String>,
    pub book_title: Option<String>,
    pub book_publisher: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        let book = row.book_ref_id.map(|id| Book {
            id,
            author: row.book_author,
            title: row.book_title,
            publisher: row.book_publisher,
        });

        User {
            id: row.id,
            username: row.username,
            name: row.name,
            book_id: row.book_id.unwrap_or(0),
            book,
        }
    }
}

/// Create user request
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name: String,
    /// Book to reference; 0 or absent leaves the reference unset
    #[serde(default)]
    pub book_id: Option<i32>,
}

impl CreateUser {
    /// Book reference as stored: `None` for the unset zero value
    pub fn book_ref(&self) -> Option<i32> {
        self.book_id.filter(|id| *id != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(book_id: Option<i32>, book_ref_id: Option<i32>) -> UserRow {
        UserRow {
            id: 1,
            username: "jdoe".into(),
            name: "Jane Doe".into(),
            book_id,
            book_ref_id,
            book_author: book_ref_id.map(|_| "Frank Herbert".to_string()),
            book_title: book_ref_id.map(|_| "Dune".to_string()),
            book_publisher: None,
        }
    }

    #[test]
    fn test_row_with_book() {
        let user = User::from(row(Some(4), Some(4)));
        assert_eq!(user.book_id, 4);
        let book = user.book.unwrap();
        assert_eq!(book.id, 4);
        assert_eq!(book.title.as_deref(), Some("Dune"));
    }

    #[test]
    fn test_row_without_book() {
        let user = User::from(row(None, None));
        assert_eq!(user.book_id, 0);
        assert!(user.book.is_none());
    }

    #[test]
    fn test_serialize_camel_case() {
        let value = serde_json::to_value(User::from(row(Some(4), Some(4)))).unwrap();
        assert_eq!(value["bookId"], 4);
        assert_eq!(value["book"]["author"], "Frank Herbert");
        assert!(value.get("book_id").is_none());
    }

    #[test]
    fn test_zero_book_id_is_unset() {
        let create: CreateUser =
            serde_json::from_value(json!({ "username": "jdoe", "name": "Jane", "bookId": 0 })).unwrap();
        assert_eq!(create.book_ref(), None);

        let create: CreateUser = serde_json::from_value(json!({ "username": "jdoe" })).unwrap();
        assert_eq!(create.book_ref(), None);
        assert_eq!(create.name, "");

        let create: CreateUser = serde_json::from_value(json!({ "bookId": 9 })).unwrap();
        assert_eq!(create.book_ref(), Some(9));
    }

    #[test]
    fn test_book_id_must_be_a_number() {
        assert!(serde_json::from_value::<CreateUser>(json!({ "bookId": "nine" })).is_err());
    }
}
