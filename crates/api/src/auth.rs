// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staff authentication and restaurant-scoped authorization.
//!
//! Staff present a bearer token. The token resolves to the restaurants
//! its holder may see and act on; owners see every restaurant.

use std::collections::HashMap;
use std::str::FromStr;

use table_notice_domain::{ManagerAccess, Notice, RestaurantId};
use tracing::debug;

use crate::error::ApiError;

/// One staff token and the access it grants.
///
/// Parsed from `TOKEN=owner` or `TOKEN=1,2,3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffGrant {
    pub token: String,
    pub access: ManagerAccess,
}

impl FromStr for StaffGrant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (token, scope) = s
            .split_once('=')
            .ok_or_else(|| format!("expected TOKEN=owner or TOKEN=<restaurant ids>, got '{s}'"))?;

        let token: &str = token.trim();
        if token.is_empty() {
            return Err(String::from("staff token must not be empty"));
        }

        let scope: &str = scope.trim();
        let access: ManagerAccess = if scope.eq_ignore_ascii_case("owner") {
            ManagerAccess::owner()
        } else {
            let ids: Vec<RestaurantId> = scope
                .split(',')
                .map(str::trim)
                .filter(|raw| !raw.is_empty())
                .map(|raw| {
                    raw.parse::<i64>()
                        .map(RestaurantId::new)
                        .map_err(|_| format!("invalid restaurant id '{raw}'"))
                })
                .collect::<Result<_, _>>()?;
            ManagerAccess::manager(ids)
        };

        Ok(Self {
            token: token.to_string(),
            access,
        })
    }
}

/// The tokens this server accepts from staff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffDirectory {
    sessions: HashMap<String, ManagerAccess>,
}

impl StaffDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token. A later grant for the same token replaces the
    /// earlier one.
    pub fn insert(&mut self, grant: StaffGrant) {
        self.sessions.insert(grant.token, grant.access);
    }

    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.sessions.contains_key(token)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl FromIterator<StaffGrant> for StaffDirectory {
    fn from_iter<I: IntoIterator<Item = StaffGrant>>(iter: I) -> Self {
        let mut directory: Self = Self::new();
        for grant in iter {
            directory.insert(grant);
        }
        directory
    }
}

/// Authentication service for staff sessions.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Resolves a bearer token to the access it carries.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` if the token is blank or unknown.
    pub fn validate_session(
        directory: &StaffDirectory,
        token: &str,
    ) -> Result<ManagerAccess, ApiError> {
        let token: &str = token.trim();
        if token.is_empty() {
            return Err(ApiError::AuthenticationFailed {
                reason: String::from("Missing authorization token"),
            });
        }

        directory
            .sessions
            .get(token)
            .cloned()
            .ok_or_else(|| ApiError::AuthenticationFailed {
                reason: String::from("Invalid user session"),
            })
    }
}

/// Authorization service for restaurant-scoped actions.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that `access` covers the notice's restaurant.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the notice belongs to a restaurant the
    /// caller does not manage.
    pub fn authorize_notice(access: &ManagerAccess, notice: &Notice) -> Result<(), ApiError> {
        let allowed: bool = access.is_owner
            || notice
                .restaurant_id()
                .is_some_and(|restaurant_id| access.can_view(restaurant_id));

        if allowed {
            Ok(())
        } else {
            debug!(notice_id = %notice.id(), "Caller does not manage this notice's restaurant");
            Err(ApiError::Unauthorized {
                notice_id: notice.id().to_string(),
            })
        }
    }
}
