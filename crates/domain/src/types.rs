// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Opaque notice identifier, assigned when the diner starts a notice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoticeId(String);

impl NoticeId {
    /// Creates a new `NoticeId`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NoticeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of the restaurant that owns a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestaurantId(i64);

impl RestaurantId {
    /// Creates a new `RestaurantId`.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-scoping policy for a signed-in staff member.
///
/// Platform owners see every restaurant; managers only see the
/// restaurants they were assigned.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerAccess {
    pub is_owner: bool,
    pub managed_restaurant_ids: Vec<RestaurantId>,
}

impl ManagerAccess {
    /// Access for the platform owner.
    #[must_use]
    pub const fn owner() -> Self {
        Self {
            is_owner: true,
            managed_restaurant_ids: Vec::new(),
        }
    }

    /// Access for a manager of the given restaurants.
    #[must_use]
    pub const fn manager(managed_restaurant_ids: Vec<RestaurantId>) -> Self {
        Self {
            is_owner: false,
            managed_restaurant_ids,
        }
    }

    /// Returns true if notices of `restaurant_id` are visible.
    #[must_use]
    pub fn can_view(&self, restaurant_id: RestaurantId) -> bool {
        self.is_owner || self.managed_restaurant_ids.contains(&restaurant_id)
    }
}

/// A diner's answer to a kitchen question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionResponse {
    Yes,
    No,
}

impl QuestionResponse {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

impl FromStr for QuestionResponse {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            _ => Err(DomainError::InvalidQuestionResponse(s.to_string())),
        }
    }
}

/// The single open yes/no question the kitchen can put to a diner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenQuestion {
    pub text: String,
    #[serde(default)]
    pub response: Option<QuestionResponse>,
    #[serde(with = "time::serde::rfc3339")]
    pub asked_at: OffsetDateTime,
}

impl KitchenQuestion {
    /// A freshly asked, unanswered question.
    #[must_use]
    pub const fn asked(text: String, asked_at: OffsetDateTime) -> Self {
        Self {
            text,
            response: None,
            asked_at,
        }
    }

    #[must_use]
    pub const fn is_answered(&self) -> bool {
        self.response.is_some()
    }
}
