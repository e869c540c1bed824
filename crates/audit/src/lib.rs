// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit trail types for notices.
//!
//! A notice carries two independent trails: the general `history`
//! timeline shown to every actor, and the face-id audit recorded only
//! when kitchen staff acknowledge a notice. Both are stored in an
//! [`AuditLog`], which can only grow.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[cfg(test)]
mod tests;

/// The kind of party that produced a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistoryActor {
    /// Floor staff.
    Server,
    /// Back-of-house staff.
    Kitchen,
    /// Automated or platform-initiated change.
    System,
    /// The diner who submitted the notice.
    Diner,
}

impl HistoryActor {
    /// Returns the persisted label for this actor.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Server => "Server",
            Self::Kitchen => "Kitchen",
            Self::System => "System",
            Self::Diner => "Diner",
        }
    }
}

impl std::fmt::Display for HistoryActor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything recorded at a point in time.
pub trait Timestamped {
    /// When the record was made.
    fn at(&self) -> OffsetDateTime;
}

/// One line of a notice's timeline.
///
/// Entries are immutable once created and are only ever appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the transition happened.
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
    /// Who performed it.
    pub actor: HistoryActor,
    /// Human readable description.
    pub message: String,
}

impl HistoryEntry {
    /// Creates a new `HistoryEntry`.
    #[must_use]
    pub const fn new(at: OffsetDateTime, actor: HistoryActor, message: String) -> Self {
        Self { at, actor, message }
    }
}

impl Timestamped for HistoryEntry {
    fn at(&self) -> OffsetDateTime {
        self.at
    }
}

/// Identity of the kitchen staff member acting on a notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffIdentity {
    pub chef_id: String,
    pub chef_name: String,
    pub role: String,
}

impl StaffIdentity {
    /// Creates a new `StaffIdentity`.
    #[must_use]
    pub fn new(
        chef_id: impl Into<String>,
        chef_name: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            chef_id: chef_id.into(),
            chef_name: chef_name.into(),
            role: role.into(),
        }
    }

    /// The shared kitchen identity used when no individual signed in.
    #[must_use]
    pub fn kitchen_team() -> Self {
        Self::new("kitchen-default", "Kitchen team", "Kitchen")
    }
}

/// A face-id accountability record written on kitchen acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceIdAuditEntry {
    pub chef_id: String,
    pub chef_name: String,
    pub role: String,
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
}

impl FaceIdAuditEntry {
    /// Records `staff` as having acted at `at`.
    #[must_use]
    pub fn new(staff: &StaffIdentity, at: OffsetDateTime) -> Self {
        Self {
            chef_id: staff.chef_id.clone(),
            chef_name: staff.chef_name.clone(),
            role: staff.role.clone(),
            at,
        }
    }
}

impl Timestamped for FaceIdAuditEntry {
    fn at(&self) -> OffsetDateTime {
        self.at
    }
}

/// An append-only, insertion-ordered log.
///
/// There is no way to remove, reorder or edit an entry once it has been
/// pushed. Serialises as a plain JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditLog<T> {
    entries: Vec<T>,
}

impl<T> AuditLog<T> {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry to the end of the log.
    pub fn push(&mut self, entry: T) {
        self.entries.push(entry);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.entries.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }
}

impl<T: Timestamped> AuditLog<T> {
    /// Timestamp of the most recent entry, if any.
    #[must_use]
    pub fn last_at(&self) -> Option<OffsetDateTime> {
        self.entries.last().map(Timestamped::at)
    }

    /// Returns true if every entry is at or after the one before it.
    #[must_use]
    pub fn is_chronological(&self) -> bool {
        self.entries.windows(2).all(|pair| pair[0].at() <= pair[1].at())
    }
}

impl<T> Default for AuditLog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for AuditLog<T> {
    fn from(entries: Vec<T>) -> Self {
        Self { entries }
    }
}

impl<'a, T> IntoIterator for &'a AuditLog<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
