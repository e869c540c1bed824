// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Diner notifications.
//!
//! Telling the diner that their notice moved is a side channel. The
//! persisted row is the record of truth; a notification that cannot be
//! delivered is logged and otherwise ignored. [`NotificationDispatcher`]
//! sends each notification on its own task and routes failures to a
//! logging task, so callers never wait on or see them.

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
#![allow(clippy::multiple_crate_versions)]

mod dispatcher;
mod error;
mod message;
mod token;

#[cfg(test)]
mod tests;

use table_notice_domain::NoticeId;

pub use dispatcher::{NotificationDispatcher, NotifierConfig};
pub use error::NotificationError;
pub use message::{
    DinerMessage, MAX_BODY_CHARS, build_diner_message, dish_title, status_message,
};
pub use token::{StaticToken, TokenSource};

/// Something that can tell a diner their notice changed.
///
/// Implementations must return promptly and must not report failure.
pub trait DinerNotifier: Send + Sync {
    /// Starts a best-effort notification for `notice_id`.
    fn notify_diner_of_update(&self, notice_id: &NoticeId);
}

/// A notifier that does nothing, for deployments without an endpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNotifier;

impl DinerNotifier for DisabledNotifier {
    fn notify_diner_of_update(&self, notice_id: &NoticeId) {
        tracing::debug!(notice_id = %notice_id, "Diner notifications disabled");
    }
}
