// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notice read queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, warn};

use table_notice_domain::{ManagerAccess, Notice, NoticeId};

use crate::data_models::{NoticeRow, deserialize_notice};
use crate::diesel_schema::notices;
use crate::error::PersistenceError;

/// Lists the notices visible under `access`, oldest first.
///
/// Owners see every restaurant. Anyone else sees only the restaurants in
/// `managed_restaurant_ids`; an empty list yields nothing without
/// querying. Rows that cannot be decoded are logged and left out.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_accessible_notices(
    conn: &mut SqliteConnection,
    access: &ManagerAccess,
) -> Result<Vec<Notice>, PersistenceError> {
    if !access.is_owner && access.managed_restaurant_ids.is_empty() {
        debug!("Manager has no restaurants; returning no notices");
        return Ok(Vec::new());
    }

    let mut query = notices::table
        .select(NoticeRow::as_select())
        .order((notices::created_at.asc(), notices::id.asc()))
        .into_boxed();

    if !access.is_owner {
        let restaurant_ids: Vec<i64> = access
            .managed_restaurant_ids
            .iter()
            .map(|id| id.value())
            .collect();
        debug!(?restaurant_ids, "Filtering notices by restaurant");
        query = query.filter(notices::restaurant_id.eq_any(restaurant_ids));
    }

    let rows: Vec<NoticeRow> = query
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_accessible_notices: {e}")))?;

    Ok(rows
        .iter()
        .filter_map(|row| match deserialize_notice(row) {
            Ok(notice) => Some(notice),
            Err(e) => {
                warn!(notice_id = %row.id, error = %e, "Skipping undecodable notice row");
                None
            }
        })
        .collect())
}

/// Retrieves one notice by id.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be decoded.
/// Returns `Ok(None)` if no notice has this id.
pub fn get_notice(
    conn: &mut SqliteConnection,
    notice_id: &NoticeId,
) -> Result<Option<Notice>, PersistenceError> {
    debug!("Looking up notice {}", notice_id);

    let row: Option<NoticeRow> = notices::table
        .filter(notices::id.eq(notice_id.as_str()))
        .select(NoticeRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_notice: {e}")))?;

    row.as_ref().map(deserialize_notice).transpose()
}

/// Counts stored notices.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_notices(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    notices::table
        .count()
        .get_result(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("count_notices: {e}")))
}
