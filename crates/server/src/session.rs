// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staff session extraction for the server.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use table_notice_api::AuthenticationService;
use table_notice_domain::ManagerAccess;
use tracing::{debug, warn};

use crate::{AppState, ErrorResponse};

/// Extractor for authenticated staff.
///
/// Reads `Authorization: Bearer <token>` and resolves the token to the
/// restaurants its holder manages.
///
/// # Errors
///
/// Rejects with HTTP 401 if the header is missing, is not a bearer
/// token, or names an unknown token.
pub struct StaffSession(pub ManagerAccess);

impl FromRequestParts<AppState> for StaffSession {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header: &str = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                SessionError::MissingAuthorizationHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid Authorization header encoding");
                SessionError::InvalidAuthorizationHeader
            })?;

        let token: &str = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            warn!("Authorization header does not start with 'Bearer '");
            SessionError::InvalidAuthorizationHeader
        })?;

        let access: ManagerAccess = AuthenticationService::validate_session(&state.staff, token)
            .map_err(|e| {
                warn!(error = %e, "Session validation failed");
                SessionError::InvalidSession(e.to_string())
            })?;

        debug!(
            owner = access.is_owner,
            restaurants = access.managed_restaurant_ids.len(),
            "Session validated"
        );

        Ok(Self(access))
    }
}

/// Session extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// Authorization header is missing.
    MissingAuthorizationHeader,
    /// Authorization header is not a bearer token.
    InvalidAuthorizationHeader,
    /// The token is not a known staff session.
    InvalidSession(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingAuthorizationHeader => String::from("Missing authorization token"),
            Self::InvalidAuthorizationHeader => {
                String::from("Invalid Authorization header format. Expected: 'Bearer <token>'")
            }
            Self::InvalidSession(reason) => reason,
        };

        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message,
        });
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}
