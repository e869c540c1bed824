// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transitions available to kitchen staff.
//!
//! Acknowledgement is the only transition that writes to the face-id
//! audit; questions and rejections only touch `history`.

use crate::error::CoreError;
use table_notice_audit::StaffIdentity;
use table_notice_domain::{Notice, Transition};
use time::OffsetDateTime;

/// Confirms the kitchen has seen and accepted the notice.
///
/// # Errors
///
/// Returns an error if the notice is not with the kitchen or answered.
pub fn acknowledge(
    notice: &Notice,
    staff: &StaffIdentity,
    at: OffsetDateTime,
) -> Result<Notice, CoreError> {
    let message: String = format!("{} acknowledged the notice.", staff.chef_name);
    Ok(notice.apply(
        Transition::KitchenAcknowledge {
            staff: staff.clone(),
        },
        message,
        at,
    )?)
}

/// Puts a yes/no question to the diner, replacing any earlier question.
///
/// # Errors
///
/// Returns an error if:
/// - the notice is not in an active kitchen state
/// - `question` is blank
pub fn ask_question(
    notice: &Notice,
    question: &str,
    at: OffsetDateTime,
) -> Result<Notice, CoreError> {
    let text: &str = question.trim();
    Ok(notice.apply(
        Transition::KitchenAskQuestion {
            text: text.to_string(),
        },
        format!("Sent a yes/no question: \"{text}\""),
        at,
    )?)
}

/// Rejects the notice from the kitchen side.
///
/// # Errors
///
/// Returns an error if the notice is not in an active kitchen state.
pub fn reject(notice: &Notice, reason: &str, at: OffsetDateTime) -> Result<Notice, CoreError> {
    let message: String = match reason.trim() {
        "" => String::from("Rejected by kitchen."),
        note => format!("Rejected by kitchen: {note}"),
    };
    Ok(notice.apply(Transition::KitchenReject, message, at)?)
}
