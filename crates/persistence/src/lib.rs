// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for table notices.
//!
//! Notices are stored one row per notice in `SQLite` through Diesel. The
//! row carries the full notice as a JSON payload next to a few columns
//! used for filtering and ordering.
//!
//! Writes are upserts keyed by notice id with no version check. Two
//! actors that read, transform and write the same notice concurrently
//! will see the later write replace the earlier one in full.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use table_notice::TransitionResult;
use table_notice_domain::{ManagerAccess, Notice, NoticeId};
use time::OffsetDateTime;
use tracing::debug;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{NoticeRow, deserialize_notice, format_column_timestamp, serialize_notice};
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for notices.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:memdb_notices_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;

        Ok(Self { conn })
    }

    /// Writes a notice, replacing any stored version.
    ///
    /// The row is built before the database is touched, so a notice
    /// without a restaurant id fails with no write attempted.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the notice has no restaurant id
    /// - the write fails
    pub fn upsert_notice(&mut self, notice: &Notice) -> Result<(), PersistenceError> {
        let row: NoticeRow = serialize_notice(notice, OffsetDateTime::now_utc())?;
        mutations::notices::upsert_notice_row(&mut self.conn, &row)?;
        debug!(notice_id = %notice.id(), status = %notice.status(), "Notice saved");
        Ok(())
    }

    /// Persists the notice produced by a transition.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn persist_transition(&mut self, result: &TransitionResult) -> Result<(), PersistenceError> {
        self.upsert_notice(&result.notice)
    }

    /// Lists notices visible to `access`, ordered by creation time.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn fetch_accessible_notices(
        &mut self,
        access: &ManagerAccess,
    ) -> Result<Vec<Notice>, PersistenceError> {
        let notices: Vec<Notice> = queries::notices::list_accessible_notices(&mut self.conn, access)?;
        debug!(
            owner = access.is_owner,
            count = notices.len(),
            "Fetched accessible notices"
        );
        Ok(notices)
    }

    /// Loads one notice.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded.
    pub fn get_notice(&mut self, notice_id: &NoticeId) -> Result<Option<Notice>, PersistenceError> {
        queries::notices::get_notice(&mut self.conn, notice_id)
    }

    /// Counts stored notices.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_notices(&mut self) -> Result<i64, PersistenceError> {
        queries::notices::count_notices(&mut self.conn)
    }
}
