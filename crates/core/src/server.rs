// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transitions available to floor staff.

use crate::error::CoreError;
use table_notice_domain::{Notice, Transition};
use time::OffsetDateTime;

const DEFAULT_REJECTION: &str = "Rejected the notice.";

/// Marks a submitted notice as ready for kitchen timing.
///
/// # Errors
///
/// Returns an error if the notice is not awaiting server approval.
pub fn approve(notice: &Notice, at: OffsetDateTime) -> Result<Notice, CoreError> {
    Ok(notice.apply(
        Transition::ServerApprove,
        "Marked ready for kitchen timing.",
        at,
    )?)
}

/// Sends a queued notice to the kitchen tablet.
///
/// # Errors
///
/// Returns an error if the notice is not queued for the kitchen.
pub fn dispatch(notice: &Notice, at: OffsetDateTime) -> Result<Notice, CoreError> {
    Ok(notice.apply(
        Transition::ServerDispatch,
        "Dispatched to kitchen tablet.",
        at,
    )?)
}

/// Rejects a notice that has not reached the kitchen yet.
///
/// An empty `reason` records "Rejected the notice.".
///
/// # Errors
///
/// Returns an error if the notice is neither awaiting approval nor queued.
pub fn reject(notice: &Notice, reason: &str, at: OffsetDateTime) -> Result<Notice, CoreError> {
    Ok(notice.apply(Transition::ServerReject, rejection_message(reason), at)?)
}

fn rejection_message(reason: &str) -> String {
    let note: &str = match reason.trim() {
        "" => DEFAULT_REJECTION,
        trimmed => trimmed,
    };
    if note.starts_with("Rejected") {
        note.to_string()
    } else {
        format!("Rejected: {note}")
    }
}
