// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Diner-side transitions.
//!
//! These are driven by the diner's device rather than staff tablets but
//! go through the same status table so every view of a notice agrees.

use crate::error::CoreError;
use table_notice_domain::{Notice, QuestionResponse, Transition};
use time::OffsetDateTime;

/// Attaches the server code the diner entered to a draft.
///
/// # Errors
///
/// Returns an error if the notice is not a draft or the code is blank.
pub fn assign_server_code(
    notice: &Notice,
    code: &str,
    at: OffsetDateTime,
) -> Result<Notice, CoreError> {
    Ok(notice.apply(
        Transition::AssignServerCode {
            code: code.to_string(),
        },
        "Server code assigned.",
        at,
    )?)
}

/// Sends the notice to the server station.
///
/// # Errors
///
/// Returns an error if the notice is not awaiting submission.
pub fn submit(notice: &Notice, at: OffsetDateTime) -> Result<Notice, CoreError> {
    Ok(notice.apply(
        Transition::DinerSubmit,
        "Submitted notice to server station.",
        at,
    )?)
}

/// Answers the kitchen's open question.
///
/// # Errors
///
/// Returns an error if there is no question waiting for an answer.
pub fn respond_to_question(
    notice: &Notice,
    response: QuestionResponse,
    at: OffsetDateTime,
) -> Result<Notice, CoreError> {
    Ok(notice.apply(
        Transition::DinerRespond { response },
        format!("Answered the kitchen question: {}.", response.as_str()),
        at,
    )?)
}

/// Withdraws an active notice.
///
/// # Errors
///
/// Returns an error if the notice is terminal or still a draft.
pub fn rescind(notice: &Notice, at: OffsetDateTime) -> Result<Notice, CoreError> {
    Ok(notice.apply(Transition::DinerRescind, "Rescinded the notice.", at)?)
}
