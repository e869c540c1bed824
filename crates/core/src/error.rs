// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use table_notice_domain::DomainError;

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
}

impl CoreError {
    /// True when the notice's status did not allow the action.
    ///
    /// Callers should re-read the notice rather than retry.
    #[must_use]
    pub const fn is_invalid_transition(&self) -> bool {
        match self {
            Self::DomainViolation(err) => err.is_invalid_transition(),
        }
    }

    /// True when the caller supplied bad input and may retry after fixing it.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        !self.is_invalid_transition()
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DomainViolation(err) => Some(err),
        }
    }
}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
