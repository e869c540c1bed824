// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Text shown to the diner when their notice changes.

use serde::Serialize;
use table_notice_audit::{HistoryActor, HistoryEntry};
use table_notice_domain::{Notice, NoticeStatus};

/// Longest body sent, in characters, including the ellipsis.
pub const MAX_BODY_CHARS: usize = 180;

const ELLIPSIS: &str = "...";
const FALLBACK_MESSAGE: &str = "Your notice was updated.";

/// A rendered notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DinerMessage {
    pub title: String,
    pub body: String,
}

/// The default text for a status, used when staff left no message.
#[must_use]
pub const fn status_message(status: NoticeStatus) -> &'static str {
    match status {
        NoticeStatus::AwaitingServerApproval => "Your notice is waiting for server approval.",
        NoticeStatus::QueuedForKitchen => {
            "Your notice has been approved and queued for the kitchen."
        }
        NoticeStatus::WithKitchen => "Your notice is now with the kitchen.",
        NoticeStatus::Acknowledged => "The kitchen acknowledged your notice.",
        NoticeStatus::AwaitingUserResponse => "The kitchen has a follow-up question.",
        NoticeStatus::QuestionAnswered => "Your response was sent to the kitchen.",
        NoticeStatus::RejectedByServer => "The server rejected your notice.",
        NoticeStatus::RejectedByKitchen => "The kitchen rejected your notice.",
        NoticeStatus::RescindedByDiner => "You rescinded this notice.",
        NoticeStatus::Draft | NoticeStatus::AwaitingUserSubmission => FALLBACK_MESSAGE,
    }
}

/// Names the dishes a notice covers: the only dish, the first dish plus
/// a count, or "your dish" when none are listed.
#[must_use]
pub fn dish_title(items: &[String]) -> String {
    let dishes: Vec<&str> = items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .collect();

    match dishes.as_slice() {
        [] => String::from("your dish"),
        [only] => (*only).to_string(),
        [first, rest @ ..] => format!("{first} + {} more", rest.len()),
    }
}

/// Builds the notification for the notice's current state.
///
/// The body is the latest message written by anyone other than the diner,
/// falling back to the status text, with whitespace collapsed and cut to
/// [`MAX_BODY_CHARS`].
#[must_use]
pub fn build_diner_message(notice: &Notice) -> DinerMessage {
    let staff_message: Option<&str> = notice
        .history()
        .iter()
        .rev()
        .find(|entry: &&HistoryEntry| entry.actor != HistoryActor::Diner)
        .map(|entry| entry.message.trim())
        .filter(|message| !message.is_empty());

    let raw: &str = staff_message.unwrap_or_else(|| status_message(notice.status()));

    DinerMessage {
        title: format!("Notice update for {}", dish_title(&notice.selected_dishes)),
        body: truncate_body(&collapse_whitespace(raw)),
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_body(text: &str) -> String {
    if text.chars().count() <= MAX_BODY_CHARS {
        return text.to_string();
    }
    let kept: String = text
        .chars()
        .take(MAX_BODY_CHARS - ELLIPSIS.len())
        .collect();
    format!("{kept}{ELLIPSIS}")
}
