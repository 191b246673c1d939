//! SQL statements for the `calendar` table.
//!
//! Values are never spliced into the SQL text; each one becomes a positional
//! `?` placeholder and travels in [`Statement::params`]. `None` binds NULL.

use crate::models::{EventFilter, EventUpdate, NewEvent};

/// A statement ready to hand to a [`crate::db::StoreConnector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Option<String>>,
}

impl Statement {
    fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    fn bind(mut self, value: impl Into<Option<String>>) -> Self {
        self.params.push(value.into());
        self
    }
}

pub fn delete(id: &str) -> Statement {
    Statement::new("DELETE FROM calendar WHERE id = ?").bind(id.to_string())
}

/// `name` is a substring match (an empty name matches every row); year,
/// month and day add an equality clause each, in that order, when supplied.
pub fn search(filter: &EventFilter) -> Statement {
    let mut sql = String::from("SELECT * FROM calendar WHERE LOCATE(?, name) > 0");
    let mut params = vec![Some(filter.name.clone())];

    for (column, value) in filter.predicates() {
        sql.push_str(" AND ");
        sql.push_str(column);
        sql.push_str(" = ?");
        params.push(Some(value.to_string()));
    }

    Statement { sql, params }
}

pub fn max_id() -> Statement {
    Statement::new("SELECT MAX(id) FROM calendar")
}

pub fn years() -> Statement {
    Statement::new("SELECT DISTINCT year FROM calendar ORDER BY year")
}

pub fn insert(event: &NewEvent) -> Statement {
    Statement::new(
        "INSERT INTO calendar (id, name, year, month, day, time) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(event.id.clone())
    .bind(event.name.clone())
    .bind(event.year.clone())
    .bind(event.stored_month())
    .bind(event.stored_day())
    .bind(event.stored_time())
}

pub fn update(event: &EventUpdate) -> Statement {
    Statement::new(
        "UPDATE calendar SET name = ?, year = ?, month = ?, day = ?, time = ? WHERE id = ?",
    )
    .bind(event.name.clone())
    .bind(event.year.clone())
    .bind(event.month.clone())
    .bind(event.day.clone())
    .bind(event.stored_time())
    .bind(event.id.clone())
}
