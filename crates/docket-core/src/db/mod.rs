//! SQLite connection management and queries for projects and tasks.
//!
//! [`Database`] owns a connection and makes sure the schema exists.
//! [`SqliteRepository`] runs the actual queries against a borrowed connection,
//! normally an open transaction handed out by [`crate::store::SqliteStore`].

use std::{path::Path, time::Duration};

use jiff::Timestamp;
use rusqlite::{
    types::Type, Connection, OptionalExtension, Row, Transaction, TransactionBehavior,
};

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod project_queries;
pub mod task_queries;

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const HAS_SEQUENCE_SQL: &str =
    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'sqlite_sequence'";
const LAST_SEQUENCE_SQL: &str = "SELECT seq FROM sqlite_sequence WHERE name = ?1";

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Begins a write transaction.
    ///
    /// The write lock is taken up front so a count-then-insert sequence cannot
    /// interleave with another writer.
    pub fn transaction(&mut self) -> Result<Transaction<'_>> {
        self.connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")
    }
}

/// Query handle over one connection or transaction.
pub struct SqliteRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteRepository<'a> {
    /// Wraps a connection; pass a transaction to get unit-of-work semantics.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Highest id AUTOINCREMENT has handed out for `table`, 0 if none.
    pub(crate) fn last_sequence(&self, table: &str) -> Result<u64> {
        // Tables from releases without AUTOINCREMENT have no sequence at all
        let has_sequence = self
            .conn
            .query_row(HAS_SEQUENCE_SQL, [], |row| row.get::<_, i64>(0))
            .db_context("Failed to inspect schema")?
            > 0;
        if !has_sequence {
            return Ok(0);
        }

        let seq = self
            .conn
            .query_row(LAST_SEQUENCE_SQL, [table], |row| row.get::<_, i64>(0))
            .optional()
            .db_context("Failed to read id sequence")?;
        Ok(seq.unwrap_or(0).max(0) as u64)
    }
}

fn timestamp_at(row: &Row, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn optional_timestamp_at(row: &Row, idx: usize) -> rusqlite::Result<Option<Timestamp>> {
    row.get::<_, Option<String>>(idx)?
        .map(|raw| {
            raw.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })
        })
        .transpose()
}
