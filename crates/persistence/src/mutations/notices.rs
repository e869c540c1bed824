// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notice writes.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::NoticeRow;
use crate::diesel_schema::notices;
use crate::error::PersistenceError;

/// Inserts `row`, or overwrites the stored row with the same id.
///
/// Every column except `created_at` is replaced. There is no version
/// check: the last write wins.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn upsert_notice_row(
    conn: &mut SqliteConnection,
    row: &NoticeRow,
) -> Result<(), PersistenceError> {
    debug!(notice_id = %row.id, status = %row.status, "Upserting notice row");

    diesel::insert_into(notices::table)
        .values(row)
        .on_conflict(notices::id)
        .do_update()
        .set(row.changes())
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("upsert_notice_row: {e}")))?;

    Ok(())
}
