// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::TransitionResult;
use crate::{diner, kitchen, server};
use table_notice_domain::{DomainError, Notice};
use time::OffsetDateTime;

/// Applies a command to a notice, producing the next notice and the
/// history entry it recorded.
///
/// # Arguments
///
/// * `notice` - The current notice (immutable)
/// * `command` - The command to apply
/// * `at` - When the command was issued
///
/// # Errors
///
/// Returns an error if:
/// - The notice's status does not allow the command
/// - The command carries blank required text
pub fn apply(
    notice: &Notice,
    command: Command,
    at: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let next: Notice = match command {
        Command::AssignServerCode { code } => diner::assign_server_code(notice, &code, at)?,
        Command::Submit => diner::submit(notice, at)?,
        Command::Approve => server::approve(notice, at)?,
        Command::Dispatch => server::dispatch(notice, at)?,
        Command::ServerReject { reason } => server::reject(notice, &reason, at)?,
        Command::Acknowledge { staff } => kitchen::acknowledge(notice, &staff, at)?,
        Command::AskQuestion { question } => kitchen::ask_question(notice, &question, at)?,
        Command::KitchenReject { reason } => kitchen::reject(notice, &reason, at)?,
        Command::RespondToQuestion { response } => {
            diner::respond_to_question(notice, response, at)?
        }
        Command::Rescind => diner::rescind(notice, at)?,
    };

    // A successful transition always appends history.
    TransitionResult::from_notice(next).ok_or_else(|| {
        CoreError::DomainViolation(DomainError::InvalidStatus(notice.status().to_string()))
    })
}
