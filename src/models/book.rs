//! Book model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::migration::{ColumnDef, SqlType, TableDef};

pub const BOOKS_TABLE: TableDef = TableDef {
    name: "books",
    columns: &[
        ColumnDef::primary_key("id"),
        ColumnDef::nullable("author", SqlType::Text),
        ColumnDef::nullable("title", SqlType::Text),
        ColumnDef::nullable("publisher", SqlType::Text),
    ],
    foreign_keys: &[],
};

/// Book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub author: Option<String>,
    pub title: Option<String>,
    pub publisher: Option<String>,
}

/// Create book request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateBook {
    pub author: Option<String>,
    pub title: Option<String>,
    pub publisher: Option<String>,
}

/// Update book request; absent or null fields are left untouched
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateBook {
    pub author: Option<String>,
    pub title: Option<String>,
    pub publisher: Option<String>,
}

impl UpdateBook {
    pub fn is_empty(&self) -> bool {
        self.author.is_none() && self.title.is_none() && self.publisher.is_none()
    }
}
