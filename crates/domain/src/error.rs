// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::status::{NoticeAction, NoticeStatus};

/// Errors that can occur during domain validation.
///
/// Every `Display` string is meant to be shown to staff as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The action is not permitted from the notice's current status.
    InvalidTransition {
        /// The action that was attempted.
        action: NoticeAction,
        /// The status the notice was in.
        from: NoticeStatus,
    },
    /// A kitchen question was empty after trimming.
    QuestionTextRequired,
    /// A server code was empty after trimming.
    ServerCodeRequired,
    /// The notice has no owning restaurant and cannot be stored.
    MissingRestaurantId,
    /// A status string did not name one of the known states.
    InvalidStatus(String),
    /// A diner answer was neither yes nor no.
    InvalidQuestionResponse(String),
}

impl DomainError {
    /// Returns true if this error is a refused state transition.
    #[must_use]
    pub const fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTransition { action, .. } => {
                f.write_str(action.invalid_transition_message())
            }
            Self::QuestionTextRequired => write!(f, "Question text is required."),
            Self::ServerCodeRequired => write!(f, "Server code is required."),
            Self::MissingRestaurantId => write!(f, "Order is missing restaurant id."),
            Self::InvalidStatus(status) => write!(f, "Unknown notice status: '{status}'"),
            Self::InvalidQuestionResponse(response) => {
                write!(f, "Question response must be 'yes' or 'no', got '{response}'")
            }
        }
    }
}

impl std::error::Error for DomainError {}
