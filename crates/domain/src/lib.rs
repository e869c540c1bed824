// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod notice;
mod status;
mod types;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use notice::{Notice, Transition};
pub use status::{NoticeAction, NoticeStatus};
pub use types::{KitchenQuestion, ManagerAccess, NoticeId, QuestionResponse, RestaurantId};

// Audit types appear in the public shape of `Notice`.
pub use table_notice_audit::{FaceIdAuditEntry, HistoryActor, HistoryEntry, StaffIdentity};
