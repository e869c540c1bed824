// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notice status tracking and the transition table.
//!
//! Every action an actor can take on a notice is listed in
//! [`NoticeAction`] together with the statuses it may start from and the
//! status it produces. Nothing else in the system decides whether a
//! status change is legal.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use table_notice_audit::HistoryActor;

/// The lifecycle state of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeStatus {
    /// Being composed by the diner.
    Draft,
    /// A server code has been issued; the diner has not submitted yet.
    AwaitingUserSubmission,
    /// Submitted; floor staff must review it.
    AwaitingServerApproval,
    /// Approved by floor staff, held until the kitchen should see it.
    QueuedForKitchen,
    /// Visible on the kitchen tablet.
    WithKitchen,
    /// Kitchen has confirmed the notice.
    Acknowledged,
    /// Kitchen asked the diner a yes/no question.
    AwaitingUserResponse,
    /// Diner answered the kitchen's question.
    QuestionAnswered,
    /// Floor staff refused the notice.
    RejectedByServer,
    /// Diner withdrew the notice.
    RescindedByDiner,
    /// Kitchen refused the notice.
    RejectedByKitchen,
}

impl NoticeStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 11] = [
        Self::Draft,
        Self::AwaitingUserSubmission,
        Self::AwaitingServerApproval,
        Self::QueuedForKitchen,
        Self::WithKitchen,
        Self::Acknowledged,
        Self::AwaitingUserResponse,
        Self::QuestionAnswered,
        Self::RejectedByServer,
        Self::RescindedByDiner,
        Self::RejectedByKitchen,
    ];

    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::AwaitingUserSubmission => "awaiting_user_submission",
            Self::AwaitingServerApproval => "awaiting_server_approval",
            Self::QueuedForKitchen => "queued_for_kitchen",
            Self::WithKitchen => "with_kitchen",
            Self::Acknowledged => "acknowledged",
            Self::AwaitingUserResponse => "awaiting_user_response",
            Self::QuestionAnswered => "question_answered",
            Self::RejectedByServer => "rejected_by_server",
            Self::RescindedByDiner => "rescinded_by_diner",
            Self::RejectedByKitchen => "rejected_by_kitchen",
        }
    }

    /// Short label shown on the tablets.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::AwaitingUserSubmission => "Waiting for diner",
            Self::AwaitingServerApproval => "Needs approval",
            Self::QueuedForKitchen => "Ready to dispatch",
            Self::WithKitchen => "Sent to kitchen",
            Self::Acknowledged => "Acknowledged",
            Self::AwaitingUserResponse => "Awaiting diner response",
            Self::QuestionAnswered => "Diner responded",
            Self::RejectedByServer => "Rejected",
            Self::RescindedByDiner => "Rescinded by diner",
            Self::RejectedByKitchen => "Rejected by kitchen",
        }
    }

    /// Returns true if no further action is expected on the notice.
    ///
    /// `Acknowledged` is terminal for the diner, although the kitchen may
    /// still reopen it with a question or reject it.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Acknowledged
                | Self::RejectedByServer
                | Self::RescindedByDiner
                | Self::RejectedByKitchen
        )
    }

    /// Returns true for the two rejected states.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::RejectedByServer | Self::RejectedByKitchen)
    }

    /// Validates that `action` may be taken from this status.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` if this status is not one of
    /// the action's source states.
    pub fn validate_action(self, action: NoticeAction) -> Result<Self, DomainError> {
        if action.valid_sources().contains(&self) {
            Ok(action.target())
        } else {
            Err(DomainError::InvalidTransition { action, from: self })
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InvalidStatus(s.to_string()))
    }
}

impl FromStr for NoticeStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for NoticeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action some actor can take on a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeAction {
    /// A server code is attached to a draft.
    AssignServerCode,
    /// The diner sends the notice to floor staff.
    DinerSubmit,
    /// Floor staff approve the notice.
    ServerApprove,
    /// Floor staff release the notice to the kitchen.
    ServerDispatch,
    /// Floor staff reject the notice.
    ServerReject,
    /// Kitchen confirms the notice.
    KitchenAcknowledge,
    /// Kitchen asks the diner a yes/no question.
    KitchenAskQuestion,
    /// Kitchen rejects the notice.
    KitchenReject,
    /// Diner answers the open kitchen question.
    DinerRespond,
    /// Diner withdraws the notice.
    DinerRescind,
}

impl NoticeAction {
    /// Every action.
    pub const ALL: [Self; 10] = [
        Self::AssignServerCode,
        Self::DinerSubmit,
        Self::ServerApprove,
        Self::ServerDispatch,
        Self::ServerReject,
        Self::KitchenAcknowledge,
        Self::KitchenAskQuestion,
        Self::KitchenReject,
        Self::DinerRespond,
        Self::DinerRescind,
    ];

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AssignServerCode => "AssignServerCode",
            Self::DinerSubmit => "DinerSubmit",
            Self::ServerApprove => "ServerApprove",
            Self::ServerDispatch => "ServerDispatch",
            Self::ServerReject => "ServerReject",
            Self::KitchenAcknowledge => "KitchenAcknowledge",
            Self::KitchenAskQuestion => "KitchenAskQuestion",
            Self::KitchenReject => "KitchenReject",
            Self::DinerRespond => "DinerRespond",
            Self::DinerRescind => "DinerRescind",
        }
    }

    /// The party recorded in history when this action is taken.
    #[must_use]
    pub const fn actor(&self) -> HistoryActor {
        match self {
            Self::AssignServerCode => HistoryActor::System,
            Self::DinerSubmit | Self::DinerRespond | Self::DinerRescind => HistoryActor::Diner,
            Self::ServerApprove | Self::ServerDispatch | Self::ServerReject => {
                HistoryActor::Server
            }
            Self::KitchenAcknowledge | Self::KitchenAskQuestion | Self::KitchenReject => {
                HistoryActor::Kitchen
            }
        }
    }

    /// The statuses this action may start from.
    #[must_use]
    pub const fn valid_sources(&self) -> &'static [NoticeStatus] {
        use NoticeStatus::{
            Acknowledged, AwaitingServerApproval, AwaitingUserResponse, AwaitingUserSubmission,
            Draft, QuestionAnswered, QueuedForKitchen, WithKitchen,
        };

        match self {
            Self::AssignServerCode => &[Draft],
            Self::DinerSubmit => &[AwaitingUserSubmission],
            Self::ServerApprove => &[AwaitingServerApproval],
            Self::ServerDispatch => &[QueuedForKitchen],
            Self::ServerReject => &[AwaitingServerApproval, QueuedForKitchen],
            Self::KitchenAcknowledge => &[WithKitchen, QuestionAnswered],
            Self::KitchenAskQuestion => &[WithKitchen, Acknowledged, QuestionAnswered],
            Self::KitchenReject => &[
                WithKitchen,
                Acknowledged,
                AwaitingUserResponse,
                QuestionAnswered,
            ],
            Self::DinerRespond => &[AwaitingUserResponse],
            Self::DinerRescind => &[
                AwaitingUserSubmission,
                AwaitingServerApproval,
                QueuedForKitchen,
                WithKitchen,
                AwaitingUserResponse,
                QuestionAnswered,
            ],
        }
    }

    /// The status a notice ends up in after this action.
    #[must_use]
    pub const fn target(&self) -> NoticeStatus {
        match self {
            Self::AssignServerCode => NoticeStatus::AwaitingUserSubmission,
            Self::DinerSubmit => NoticeStatus::AwaitingServerApproval,
            Self::ServerApprove => NoticeStatus::QueuedForKitchen,
            Self::ServerDispatch => NoticeStatus::WithKitchen,
            Self::ServerReject => NoticeStatus::RejectedByServer,
            Self::KitchenAcknowledge => NoticeStatus::Acknowledged,
            Self::KitchenAskQuestion => NoticeStatus::AwaitingUserResponse,
            Self::KitchenReject => NoticeStatus::RejectedByKitchen,
            Self::DinerRespond => NoticeStatus::QuestionAnswered,
            Self::DinerRescind => NoticeStatus::RescindedByDiner,
        }
    }

    /// The message shown when this action is refused.
    #[must_use]
    pub const fn invalid_transition_message(&self) -> &'static str {
        match self {
            Self::AssignServerCode => "Server codes can only be assigned to draft notices.",
            Self::DinerSubmit => "Notice is not waiting for diner submission.",
            Self::ServerApprove => "Order is not waiting for server approval.",
            Self::ServerDispatch => "Order cannot be dispatched from its current status.",
            Self::ServerReject => "Only pending server orders can be rejected.",
            Self::KitchenAcknowledge => "Kitchen can only acknowledge active orders.",
            Self::KitchenAskQuestion => "Kitchen can only send questions for active orders.",
            Self::KitchenReject => "Kitchen can only reject active orders.",
            Self::DinerRespond => "There is no open kitchen question to answer.",
            Self::DinerRescind => "Only active notices can be rescinded.",
        }
    }
}

impl std::fmt::Display for NoticeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
