// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row shape for the `notices` table and conversion to and from [`Notice`].
//!
//! The `payload` column holds the full notice as JSON, including both audit
//! trails. `restaurant_id`, `status` and the timestamp columns are copies
//! kept for filtering and ordering.

use diesel::prelude::*;
use serde_json::{Map, Value};
use table_notice_domain::{Notice, NoticeStatus};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::diesel_schema::notices;
use crate::error::PersistenceError;

/// Fixed-width UTC timestamps so text ordering matches time ordering.
const COLUMN_TIMESTAMP: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:9]Z"
);

/// Payload keys that must hold arrays.
const LIST_FIELDS: [&str; 5] = ["history", "items", "allergies", "diets", "faceIdAudit"];

/// A stored notice row.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = notices)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NoticeRow {
    pub id: String,
    pub restaurant_id: i64,
    pub status: String,
    pub payload: String,
    pub created_at: String,
    pub updated_at: String,
    pub rejected_at: Option<String>,
}

/// Columns overwritten when a row with the same id already exists.
///
/// `created_at` is left out so the first write keeps it.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = notices)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct NoticeChanges<'a> {
    restaurant_id: i64,
    status: &'a str,
    payload: &'a str,
    updated_at: &'a str,
    rejected_at: Option<&'a str>,
}

impl NoticeRow {
    pub(crate) fn changes(&self) -> NoticeChanges<'_> {
        NoticeChanges {
            restaurant_id: self.restaurant_id,
            status: &self.status,
            payload: &self.payload,
            updated_at: &self.updated_at,
            rejected_at: self.rejected_at.as_deref(),
        }
    }
}

/// Formats a timestamp the way the row columns store it.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn format_column_timestamp(at: OffsetDateTime) -> Result<String, PersistenceError> {
    Ok(at.to_offset(UtcOffset::UTC).format(COLUMN_TIMESTAMP)?)
}

/// Builds the row written for `notice`, stamping `updated_at` with
/// `written_at`.
///
/// No storage is touched; a notice without a restaurant fails here.
///
/// # Errors
///
/// Returns an error if:
/// - the notice has no restaurant id
/// - the notice cannot be encoded
pub fn serialize_notice(
    notice: &Notice,
    written_at: OffsetDateTime,
) -> Result<NoticeRow, PersistenceError> {
    let restaurant_id = notice.require_restaurant_id()?;

    Ok(NoticeRow {
        id: notice.id().as_str().to_string(),
        restaurant_id: restaurant_id.value(),
        status: notice.status().as_str().to_string(),
        payload: serde_json::to_string(notice)?,
        created_at: format_column_timestamp(notice.created_at())?,
        updated_at: format_column_timestamp(written_at)?,
        rejected_at: notice
            .rejected_at()
            .map(format_column_timestamp)
            .transpose()?,
    })
}

/// Rebuilds a notice from a stored row.
///
/// The row's `id`, `status` and `restaurant_id` columns override the
/// payload. Timestamps in the payload win; row timestamps only fill gaps.
/// Missing lists become empty.
///
/// # Errors
///
/// Returns an error if:
/// - the status column is not a known status
/// - the payload is not a JSON object or does not describe a notice
pub fn deserialize_notice(row: &NoticeRow) -> Result<Notice, PersistenceError> {
    let status: NoticeStatus = row.status.parse()?;

    let mut payload: Map<String, Value> = match serde_json::from_str::<Value>(&row.payload)? {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            return Err(PersistenceError::SerializationError(format!(
                "notice {} payload is not an object: {other}",
                row.id
            )));
        }
    };

    payload.insert(String::from("id"), Value::String(row.id.clone()));
    payload.insert(String::from("status"), Value::String(status.as_str().to_string()));
    payload.insert(String::from("restaurantId"), Value::from(row.restaurant_id));

    fill_missing(&mut payload, "createdAt", Some(&row.created_at));
    fill_missing(&mut payload, "updatedAt", Some(&row.updated_at));
    fill_missing(&mut payload, "rejectedAt", row.rejected_at.as_ref());

    if let Some(dishes) = payload.remove("selectedDishes") {
        payload.entry("items").or_insert(dishes);
    }
    for field in LIST_FIELDS {
        if !matches!(payload.get(field), Some(Value::Array(_))) {
            payload.insert(field.to_string(), Value::Array(Vec::new()));
        }
    }

    Ok(serde_json::from_value(Value::Object(payload))?)
}

fn fill_missing(payload: &mut Map<String, Value>, key: &str, value: Option<&String>) {
    let absent: bool = matches!(payload.get(key), None | Some(Value::Null));
    if let Some(value) = value.filter(|_| absent) {
        payload.insert(key.to_string(), Value::String(value.clone()));
    }
}
