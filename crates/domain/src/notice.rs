// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The notice entity.
//!
//! A `Notice` is never mutated in place by the workflow: [`Notice::apply`]
//! validates a [`Transition`] against the status table and returns a new
//! value. The original is left untouched whether the call succeeds or
//! fails.

use crate::error::DomainError;
use crate::status::{NoticeAction, NoticeStatus};
use crate::types::{KitchenQuestion, NoticeId, QuestionResponse, RestaurantId};
use serde::{Deserialize, Serialize};
use table_notice_audit::{AuditLog, FaceIdAuditEntry, HistoryEntry, StaffIdentity};
use time::OffsetDateTime;

/// A state change together with the data it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Attach a server code to a draft.
    AssignServerCode {
        /// The code the diner will quote to floor staff.
        code: String,
    },
    DinerSubmit,
    ServerApprove,
    ServerDispatch,
    ServerReject,
    /// Kitchen confirms; `staff` is written to the face-id audit.
    KitchenAcknowledge {
        /// Who acknowledged.
        staff: StaffIdentity,
    },
    /// Kitchen opens a yes/no question, replacing any earlier one.
    KitchenAskQuestion {
        /// The question text.
        text: String,
    },
    KitchenReject,
    /// Diner answers the open question.
    DinerRespond {
        /// The answer.
        response: QuestionResponse,
    },
    DinerRescind,
}

impl Transition {
    /// The table entry this transition is checked against.
    #[must_use]
    pub const fn action(&self) -> NoticeAction {
        match self {
            Self::AssignServerCode { .. } => NoticeAction::AssignServerCode,
            Self::DinerSubmit => NoticeAction::DinerSubmit,
            Self::ServerApprove => NoticeAction::ServerApprove,
            Self::ServerDispatch => NoticeAction::ServerDispatch,
            Self::ServerReject => NoticeAction::ServerReject,
            Self::KitchenAcknowledge { .. } => NoticeAction::KitchenAcknowledge,
            Self::KitchenAskQuestion { .. } => NoticeAction::KitchenAskQuestion,
            Self::KitchenReject => NoticeAction::KitchenReject,
            Self::DinerRespond { .. } => NoticeAction::DinerRespond,
            Self::DinerRescind => NoticeAction::DinerRescind,
        }
    }
}

/// A diner's allergy/diet disclosure moving between floor and kitchen.
///
/// Descriptive fields supplied by the diner are public and opaque to the
/// workflow. Status, audit trails and timestamps are only reachable
/// through [`Notice::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    id: NoticeId,
    #[serde(default)]
    restaurant_id: Option<RestaurantId>,
    status: NoticeStatus,
    #[serde(default)]
    pub server_code: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub dining_mode: Option<String>,
    #[serde(default)]
    pub table_number: Option<String>,
    /// The signed-in diner, if any. Used to route update notifications.
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default, rename = "items", alias = "selectedDishes")]
    pub selected_dishes: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub diets: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    history: AuditLog<HistoryEntry>,
    #[serde(default)]
    kitchen_question: Option<KitchenQuestion>,
    #[serde(default)]
    face_id_audit: AuditLog<FaceIdAuditEntry>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    rejected_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    rescinded_at: Option<OffsetDateTime>,
}

impl Notice {
    /// Creates an empty draft notice.
    #[must_use]
    pub const fn new(
        id: NoticeId,
        restaurant_id: Option<RestaurantId>,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            restaurant_id,
            status: NoticeStatus::Draft,
            server_code: None,
            customer_name: None,
            dining_mode: None,
            table_number: None,
            user_id: None,
            selected_dishes: Vec::new(),
            allergies: Vec::new(),
            diets: Vec::new(),
            notes: None,
            history: AuditLog::new(),
            kitchen_question: None,
            face_id_audit: AuditLog::new(),
            created_at,
            updated_at: created_at,
            rejected_at: None,
            rescinded_at: None,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &NoticeId {
        &self.id
    }

    #[must_use]
    pub const fn restaurant_id(&self) -> Option<RestaurantId> {
        self.restaurant_id
    }

    #[must_use]
    pub const fn status(&self) -> NoticeStatus {
        self.status
    }

    #[must_use]
    pub const fn history(&self) -> &AuditLog<HistoryEntry> {
        &self.history
    }

    #[must_use]
    pub const fn kitchen_question(&self) -> Option<&KitchenQuestion> {
        self.kitchen_question.as_ref()
    }

    #[must_use]
    pub const fn face_id_audit(&self) -> &AuditLog<FaceIdAuditEntry> {
        &self.face_id_audit
    }

    #[must_use]
    pub const fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    #[must_use]
    pub const fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }

    #[must_use]
    pub const fn rejected_at(&self) -> Option<OffsetDateTime> {
        self.rejected_at
    }

    #[must_use]
    pub const fn rescinded_at(&self) -> Option<OffsetDateTime> {
        self.rescinded_at
    }

    /// Returns the owning restaurant, required before a notice is stored.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingRestaurantId` if none is set.
    pub fn require_restaurant_id(&self) -> Result<RestaurantId, DomainError> {
        self.restaurant_id.ok_or(DomainError::MissingRestaurantId)
    }

    /// Applies a transition, producing the next version of this notice.
    ///
    /// The status check runs first; input validation second. On any error
    /// nothing is produced and `self` is unchanged. On success exactly one
    /// history entry is appended with `message`, `updatedAt` moves to the
    /// transition time, and `rejectedAt` is set when entering a rejected
    /// state.
    ///
    /// `at` is clamped so it never precedes the latest recorded timestamp,
    /// keeping both audit trails chronological.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the current status is not a valid source for the transition
    /// - a question or server code is empty after trimming
    pub fn apply(
        &self,
        transition: Transition,
        message: impl Into<String>,
        at: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        let action: NoticeAction = transition.action();
        let next_status: NoticeStatus = self.status.validate_action(action)?;
        let at: OffsetDateTime = self.next_timestamp(at);

        let mut next: Self = self.clone();
        match transition {
            Transition::AssignServerCode { code } => {
                let code = code.trim();
                if code.is_empty() {
                    return Err(DomainError::ServerCodeRequired);
                }
                next.server_code = Some(code.to_string());
            }
            Transition::KitchenAcknowledge { staff } => {
                next.face_id_audit.push(FaceIdAuditEntry::new(&staff, at));
            }
            Transition::KitchenAskQuestion { text } => {
                let text = text.trim();
                if text.is_empty() {
                    return Err(DomainError::QuestionTextRequired);
                }
                next.kitchen_question = Some(KitchenQuestion::asked(text.to_string(), at));
            }
            Transition::DinerRespond { response } => {
                if let Some(question) = next.kitchen_question.as_mut() {
                    question.response = Some(response);
                }
            }
            Transition::DinerRescind => next.rescinded_at = Some(at),
            Transition::DinerSubmit
            | Transition::ServerApprove
            | Transition::ServerDispatch
            | Transition::ServerReject
            | Transition::KitchenReject => {}
        }

        next.status = next_status;
        next.history
            .push(HistoryEntry::new(at, action.actor(), message.into()));
        next.updated_at = at;
        if next_status.is_rejected() {
            next.rejected_at = Some(at);
        }

        Ok(next)
    }

    fn next_timestamp(&self, at: OffsetDateTime) -> OffsetDateTime {
        [
            Some(at),
            Some(self.updated_at),
            self.history.last_at(),
            self.face_id_audit.last_at(),
        ]
        .into_iter()
        .flatten()
        .max()
        .unwrap_or(at)
    }
}
