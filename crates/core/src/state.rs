// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use table_notice_audit::HistoryEntry;
use table_notice_domain::Notice;

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The notice after the transition.
    pub notice: Notice,
    /// The history entry the transition appended.
    pub history_entry: HistoryEntry,
}

impl TransitionResult {
    pub(crate) fn from_notice(notice: Notice) -> Option<Self> {
        let history_entry: HistoryEntry = notice.history().last()?.clone();
        Some(Self {
            notice,
            history_entry,
        })
    }
}
