// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use serde::{Deserialize, Serialize};
use table_notice::Command;
use table_notice_audit::StaffIdentity;
use table_notice_notify::DinerMessage;

/// A new notice started by a diner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateNoticeRequest {
    pub id: String,
    pub restaurant_id: Option<i64>,
    pub customer_name: Option<String>,
    pub dining_mode: Option<String>,
    pub table_number: Option<String>,
    pub user_id: Option<String>,
    #[serde(alias = "selectedDishes")]
    pub items: Vec<String>,
    pub allergies: Vec<String>,
    pub diets: Vec<String>,
    pub notes: Option<String>,
}

/// A rejection with an optional reason.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RejectRequest {
    pub reason: Option<String>,
}

impl RejectRequest {
    #[must_use]
    pub fn into_server_command(self) -> Command {
        Command::ServerReject {
            reason: self.reason.unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn into_kitchen_command(self) -> Command {
        Command::KitchenReject {
            reason: self.reason.unwrap_or_default(),
        }
    }
}

/// Who is acknowledging. Missing fields fall back to the shared kitchen
/// identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AcknowledgeRequest {
    pub chef_id: Option<String>,
    pub chef_name: Option<String>,
    pub role: Option<String>,
}

impl AcknowledgeRequest {
    #[must_use]
    pub fn staff(self) -> StaffIdentity {
        let fallback: StaffIdentity = StaffIdentity::kitchen_team();
        StaffIdentity::new(
            self.chef_id.unwrap_or(fallback.chef_id),
            self.chef_name.unwrap_or(fallback.chef_name),
            self.role.unwrap_or(fallback.role),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AskQuestionRequest {
    pub question: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerCodeRequest {
    pub code: String,
}

/// A diner's answer, as typed ("yes" or "no").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RespondRequest {
    pub response: String,
}

/// Body of a diner-notice call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DinerNoticeRequest {
    pub order_id: Option<String>,
}

/// What the diner-notice call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DinerNoticeOutcome {
    /// The notice has no signed-in diner to notify.
    NoUser,
    /// A message was produced for `user_id`.
    Sent {
        user_id: String,
        message: DinerMessage,
    },
}

/// Wire response for a diner-notice call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DinerNoticeResponse {
    #[serde(rename_all = "camelCase")]
    Skipped { skipped: bool, reason: String },
    #[serde(rename_all = "camelCase")]
    Delivered {
        success: bool,
        pushes_sent: u32,
        ios_pushes_sent: u32,
    },
}

impl From<&DinerNoticeOutcome> for DinerNoticeResponse {
    fn from(outcome: &DinerNoticeOutcome) -> Self {
        match outcome {
            DinerNoticeOutcome::NoUser => Self::Skipped {
                skipped: true,
                reason: String::from("no_user"),
            },
            // No push transport is wired up yet, so nothing is counted.
            DinerNoticeOutcome::Sent { .. } => Self::Delivered {
                success: true,
                pushes_sent: 0,
                ios_pushes_sent: 0,
            },
        }
    }
}
