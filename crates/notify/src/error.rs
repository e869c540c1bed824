// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Why a diner notification was not delivered.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// No session token was available to authenticate the call.
    #[error("No access token available for diner notification")]
    MissingToken,

    /// The endpoint answered with a non-success status.
    #[error("Notification endpoint responded with status {status}")]
    Rejected { status: u16 },

    /// The request could not be sent or its response not read.
    #[error("Notification request failed: {0}")]
    Transport(#[from] reqwest::Error),
}
