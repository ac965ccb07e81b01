//! Additive schema sync driven by the entity table definitions.
//!
//! Tables and missing columns are created, missing foreign keys are added.
//! Nothing is ever dropped or renamed; a column whose type no longer matches
//! its definition aborts the sync.

use sqlx::PgPool;

use crate::error::{AppError, AppResult};

/// Column types used by the entity definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Serial,
    Integer,
    Text,
}

impl SqlType {
    fn ddl(self) -> &'static str {
        match self {
            SqlType::Serial => "SERIAL",
            SqlType::Integer => "INTEGER",
            SqlType::Text => "TEXT",
        }
    }

    /// Name reported by `information_schema.columns.data_type`
    fn data_type(self) -> &'static str {
        match self {
            SqlType::Serial | SqlType::Integer => "integer",
            SqlType::Text => "text",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: SqlType,
    pub nullable: bool,
    pub default: Option<&'static str>,
    pub primary_key: bool,
}

impl ColumnDef {
    pub const fn primary_key(name: &'static str) -> Self {
        Self {
            name,
            sql_type: SqlType::Serial,
            nullable: false,
            default: None,
            primary_key: true,
        }
    }

    pub const fn nullable(name: &'static str, sql_type: SqlType) -> Self {
        Self {
            name,
            sql_type,
            nullable: true,
            default: None,
            primary_key: false,
        }
    }

    pub const fn required(name: &'static str, sql_type: SqlType, default: &'static str) -> Self {
        Self {
            name,
            sql_type,
            nullable: false,
            default: Some(default),
            primary_key: false,
        }
    }

    fn ddl(&self) -> String {
        let mut def = format!("{} {}", quote(self.name), self.sql_type.ddl());
        if self.primary_key {
            def.push_str(" PRIMARY KEY");
        } else if !self.nullable {
            def.push_str(" NOT NULL");
        }
        if let Some(default) = self.default {
            def.push_str(&format!(" DEFAULT {}", default));
        }
        def
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ForeignKeyDef {
    pub name: &'static str,
    pub column: &'static str,
    pub references_table: &'static str,
    pub references_column: &'static str,
}

/// Backing table of an entity
#[derive(Debug, Clone, Copy)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
    pub foreign_keys: &'static [ForeignKeyDef],
}

impl TableDef {
    pub fn create_table_sql(&self) -> String {
        let columns: Vec<String> = self.columns.iter().map(ColumnDef::ddl).collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            quote(self.name),
            columns.join(", ")
        )
    }

    /// Statements adding the columns absent from `existing`
    /// (`(column_name, data_type)` pairs as read from `information_schema`).
    pub fn plan_columns(&self, existing: &[(String, String)]) -> AppResult<Vec<String>> {
        let mut statements = Vec::new();

        for column in self.columns {
            match existing.iter().find(|(name, _)| name == column.name) {
                Some((_, data_type)) if data_type != column.sql_type.data_type() => {
                    return Err(AppError::Migration(format!(
                        "column {}.{} is {}, expected {}",
                        self.name,
                        column.name,
                        data_type,
                        column.sql_type.data_type()
                    )));
                }
                Some(_) => {}
                None if column.primary_key => {
                    return Err(AppError::Migration(format!(
                        "table {} exists without primary key column {}",
                        self.name, column.name
                    )));
                }
                None => statements.push(format!(
                    "ALTER TABLE {} ADD COLUMN {}",
                    quote(self.name),
                    column.ddl()
                )),
            }
        }

        Ok(statements)
    }

    /// Statements adding the foreign keys absent from `existing` constraint names
    pub fn plan_foreign_keys(&self, existing: &[String]) -> Vec<String> {
        self.foreign_keys
            .iter()
            .filter(|fk| !existing.iter().any(|name| name == fk.name))
            .map(|fk| {
                format!(
                    "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
                    quote(self.name),
                    quote(fk.name),
                    quote(fk.column),
                    quote(fk.references_table),
                    quote(fk.references_column)
                )
            })
            .collect()
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Bring the database in line with the given tables, in order.
pub async fn sync_schema(pool: &PgPool, tables: &[&TableDef]) -> AppResult<()> {
    for table in tables {
        sqlx::query(&table.create_table_sql()).execute(pool).await?;

        let existing: Vec<(String, String)> = sqlx::query_as(
            r#"
            SELECT column_name::text, data_type::text
            FROM information_schema.columns
            WHERE table_schema = current_schema() AND table_name = $1
            "#,
        )
        .bind(table.name)
        .fetch_all(pool)
        .await?;

        for statement in table.plan_columns(&existing)? {
            tracing::info!("Schema sync: {}", statement);
            sqlx::query(&statement).execute(pool).await?;
        }

        let constraints: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT constraint_name::text
            FROM information_schema.table_constraints
            WHERE table_schema = current_schema()
              AND table_name = $1
              AND constraint_type = 'FOREIGN KEY'
            "#,
        )
        .bind(table.name)
        .fetch_all(pool)
        .await?;

        for statement in table.plan_foreign_keys(&constraints) {
            tracing::info!("Schema sync: {}", statement);
            sqlx::query(&statement).execute(pool).await?;
        }

        tracing::debug!("Table {} is up to date", table.name);
    }

    Ok(())
}
