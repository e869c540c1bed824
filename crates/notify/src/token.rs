// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Supplies the bearer token presented to the notification endpoint.
///
/// Called once per notification, so a source backed by a session can
/// hand out a fresh short-lived token each time.
pub trait TokenSource: Send + Sync {
    /// The current token, or `None` when there is no session.
    fn access_token(&self) -> Option<String>;
}

/// A fixed token, or none at all.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    /// A source that never has a token.
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }
}

impl TokenSource for StaticToken {
    fn access_token(&self) -> Option<String> {
        self.0.clone()
    }
}
