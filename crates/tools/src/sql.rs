//! Question answering over a SQLite database.
//!
//! [`Database`] describes its schema for the model and executes the query
//! the model writes. Query failures come back as `Error: ...` strings so the
//! answer step can still explain them.

use anyhow::Result;
use parking_lot::Mutex;
use rusqlite::{Connection, types::ValueRef};
use serde_json::{Map, Number, Value};
use std::path::Path;

const SQL_TABLES: &str = include_str!("../sql/tables.sql");

/// Sample rows shown per table in [`Database::table_info`].
pub const SAMPLE_ROWS: usize = 3;

/// A SQLite database behind a lock.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create a database file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// The SQL dialect, for query-writing prompts.
    pub fn dialect(&self) -> &'static str {
        "sqlite"
    }

    /// Execute a batch of statements, e.g. to seed a database.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn.lock().execute_batch(sql)?;
        Ok(())
    }

    /// Names of the user tables, sorted.
    pub fn tables(&self) -> Result<Vec<String>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(SQL_TABLES)?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(names)
    }

    /// Each table's `CREATE` statement followed by a few sample rows.
    pub fn table_info(&self) -> Result<String> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(SQL_TABLES)?;
        let tables = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut info = Vec::with_capacity(tables.len());
        for (name, create) in tables {
            let sample = format!(
                "SELECT * FROM \"{}\" LIMIT {SAMPLE_ROWS}",
                name.replace('"', "\"\"")
            );
            let mut stmt = conn.prepare(&sample)?;
            let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
            let mut lines = vec![columns.join("\t")];
            let mut rows = stmt.query([])?;
            while let Some(row) = rows.next()? {
                let mut cells = Vec::with_capacity(columns.len());
                for i in 0..columns.len() {
                    cells.push(cell(row.get_ref(i)?));
                }
                lines.push(cells.join("\t"));
            }

            info.push(format!(
                "{create}\n\n/*\n{SAMPLE_ROWS} rows from {name} table:\n{}\n*/",
                lines.join("\n")
            ));
        }
        Ok(info.join("\n\n"))
    }

    /// Rows of `query` as a JSON array of objects.
    pub fn query(&self, query: &str) -> Result<Value> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(query)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
        let mut rows = stmt.query([])?;

        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut object = Map::new();
            for (i, column) in columns.iter().enumerate() {
                object.insert(column.clone(), json(row.get_ref(i)?));
            }
            out.push(Value::Object(object));
        }
        Ok(Value::Array(out))
    }

    /// [`Database::query`] rendered for the model; failures become
    /// `Error: ...`.
    pub fn run(&self, query: &str) -> String {
        tracing::debug!("sql: {query}");
        match self.query(query) {
            Ok(rows) => rows.to_string(),
            Err(e) => format!("Error: {e}"),
        }
    }
}

fn json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Number(i.into()),
        ValueRef::Real(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::String(format!("<{} bytes>", b.len())),
    }
}

fn cell(value: ValueRef<'_>) -> String {
    match json(value) {
        Value::Null => "NULL".to_owned(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}
