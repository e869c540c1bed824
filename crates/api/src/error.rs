// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use table_notice::CoreError;
use table_notice_domain::DomainError;
use table_notice_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The caller did not present a valid staff token.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The caller may not act on this notice's restaurant.
    Unauthorized {
        /// The notice that was refused.
        notice_id: String,
    },
    /// The notice's status does not allow the requested action.
    ///
    /// The caller should refresh the notice before choosing another action.
    InvalidTransition {
        /// The staff-facing refusal message.
        message: String,
    },
    /// Invalid input was provided.
    Validation {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    NotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Storage failed; the caller may retry.
    Persistence {
        /// A description of the storage failure.
        message: String,
    },
}

impl ApiError {
    pub(crate) fn notice_not_found(notice_id: &str) -> Self {
        Self::NotFound {
            resource_type: String::from("Notice"),
            message: format!("No notice with id '{notice_id}'"),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => f.write_str(reason),
            Self::Unauthorized { notice_id } => {
                write!(f, "Not authorized for notice '{notice_id}'")
            }
            Self::InvalidTransition { message } | Self::Validation { message, .. } => {
                f.write_str(message)
            }
            Self::NotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Persistence { message } => write!(f, "Persistence error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let field: &str = match &err {
        DomainError::InvalidTransition { .. } => {
            return ApiError::InvalidTransition {
                message: err.to_string(),
            };
        }
        DomainError::QuestionTextRequired => "question",
        DomainError::ServerCodeRequired => "code",
        DomainError::MissingRestaurantId => "restaurantId",
        DomainError::InvalidStatus(_) => "status",
        DomainError::InvalidQuestionResponse(_) => "response",
    };
    ApiError::Validation {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
///
/// A notice refused for lacking a restaurant is the caller's input
/// problem; anything else, including an undecodable stored row, is a
/// storage failure.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::InvalidNotice(DomainError::MissingRestaurantId) => {
            translate_domain_error(DomainError::MissingRestaurantId)
        }
        other => ApiError::Persistence {
            message: other.to_string(),
        },
    }
}
