// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use table_notice_audit::StaffIdentity;
use table_notice_domain::QuestionResponse;

/// A command represents actor intent as data only.
///
/// Commands are the only way to request a status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Diner enters the server code for their table.
    AssignServerCode {
        /// The code as typed.
        code: String,
    },
    /// Diner sends the notice to the server station.
    Submit,
    /// Server marks the notice ready for kitchen timing.
    Approve,
    /// Server sends the notice to the kitchen tablet.
    Dispatch,
    /// Server refuses the notice.
    ServerReject {
        /// Free-text reason; may be empty.
        reason: String,
    },
    /// Kitchen confirms the notice.
    Acknowledge {
        /// The staff member confirming.
        staff: StaffIdentity,
    },
    /// Kitchen asks the diner a yes/no question.
    AskQuestion {
        /// The question text.
        question: String,
    },
    /// Kitchen refuses the notice.
    KitchenReject {
        /// Free-text reason; may be empty.
        reason: String,
    },
    /// Diner answers the kitchen's question.
    RespondToQuestion {
        /// The answer.
        response: QuestionResponse,
    },
    /// Diner withdraws the notice.
    Rescind,
}

impl Command {
    /// Stable name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AssignServerCode { .. } => "AssignServerCode",
            Self::Submit => "Submit",
            Self::Approve => "Approve",
            Self::Dispatch => "Dispatch",
            Self::ServerReject { .. } => "ServerReject",
            Self::Acknowledge { .. } => "Acknowledge",
            Self::AskQuestion { .. } => "AskQuestion",
            Self::KitchenReject { .. } => "KitchenReject",
            Self::RespondToQuestion { .. } => "RespondToQuestion",
            Self::Rescind => "Rescind",
        }
    }
}
