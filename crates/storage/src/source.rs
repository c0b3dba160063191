#![forbid(unsafe_code)]

use crate::StoreError;
use crate::query::build_select;
use rdt_core::source::{RecordSource, SourceConfig};
use rdt_core::tree::Record;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, params_from_iter};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Reads tree records from a SQLite table.
#[derive(Debug)]
pub struct SqliteRecordSource {
    conn: Connection,
}

impl SqliteRecordSource {
    /// Opens an existing database read-only.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("database not found: {}", path.display()),
            )));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(Self { conn })
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl RecordSource for SqliteRecordSource {
    type Error = StoreError;

    fn fetch(&mut self, config: &SourceConfig) -> Result<Vec<Record>, StoreError> {
        let query = build_select(config)?;
        debug!(sql = query.sql.as_str(), params = query.params.len(), "fetching records");

        let mut stmt = self.conn.prepare(&query.sql)?;
        let mut rows = stmt.query(params_from_iter(query.params.iter()))?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let index = records.len();
            let invalid = |message| StoreError::InvalidRow {
                row: index,
                message,
            };
            let key = match project_text(row.get_ref(0)?) {
                Projected::Text(key) => key,
                Projected::BadUtf8 => return Err(invalid("key is not valid UTF-8")),
                Projected::WrongType => return Err(invalid("key must be an integer or text")),
            };
            let parent_key = project_parent(row.get_ref(1)?).map_err(invalid)?;
            let label = match row.get_ref(2)? {
                ValueRef::Null => String::new(),
                value => match project_text(value) {
                    Projected::Text(label) => label,
                    Projected::BadUtf8 => return Err(invalid("label is not valid UTF-8")),
                    Projected::WrongType => return Err(invalid("label must be text")),
                },
            };
            records.push(Record {
                key,
                parent_key,
                label,
            });
        }

        debug!(records = records.len(), "records fetched");
        Ok(records)
    }
}

enum Projected {
    Text(String),
    BadUtf8,
    WrongType,
}

fn project_text(value: ValueRef<'_>) -> Projected {
    match value {
        ValueRef::Integer(n) => Projected::Text(n.to_string()),
        ValueRef::Real(n) => Projected::Text(n.to_string()),
        ValueRef::Text(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) => Projected::Text(text.to_string()),
            Err(_) => Projected::BadUtf8,
        },
        ValueRef::Null | ValueRef::Blob(_) => Projected::WrongType,
    }
}

// NULL, blank text and integer 0 all mean "no parent".
fn project_parent(value: ValueRef<'_>) -> Result<Option<String>, &'static str> {
    match value {
        ValueRef::Null | ValueRef::Integer(0) => Ok(None),
        ValueRef::Text(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(None),
        value => match project_text(value) {
            Projected::Text(key) => Ok(Some(key)),
            Projected::BadUtf8 => Err("parent key is not valid UTF-8"),
            Projected::WrongType => Err("parent key must be an integer or text"),
        },
    }
}
