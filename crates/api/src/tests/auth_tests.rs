// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use table_notice_domain::{ManagerAccess, Notice, NoticeId, RestaurantId};

use super::helpers::START;
use crate::{ApiError, AuthenticationService, AuthorizationService, StaffDirectory, StaffGrant};

fn create_test_directory() -> StaffDirectory {
    ["boss=owner", "floor-1=1", "floor-23=2, 3"]
        .into_iter()
        .map(|raw| raw.parse::<StaffGrant>().unwrap())
        .collect()
}

fn create_test_notice(restaurant_id: i64) -> Notice {
    Notice::new(
        NoticeId::new("n-1"),
        Some(RestaurantId::new(restaurant_id)),
        START,
    )
}

#[test]
fn test_grant_parses_owner_and_manager_scopes() {
    let owner: StaffGrant = "boss=Owner".parse().unwrap();
    let manager: StaffGrant = "floor=2, 3".parse().unwrap();

    assert_eq!(owner.token, "boss");
    assert_eq!(owner.access, ManagerAccess::owner());
    assert_eq!(
        manager.access,
        ManagerAccess::manager(vec![RestaurantId::new(2), RestaurantId::new(3)])
    );
}

#[test]
fn test_grant_rejects_malformed_input() {
    assert!("no-separator".parse::<StaffGrant>().is_err());
    assert!("=owner".parse::<StaffGrant>().is_err());
    assert!("floor=1,x".parse::<StaffGrant>().is_err());
}

#[test]
fn test_known_token_resolves_to_its_access() {
    let directory: StaffDirectory = create_test_directory();

    let access: ManagerAccess =
        AuthenticationService::validate_session(&directory, "floor-23").unwrap();

    assert_eq!(
        access,
        ManagerAccess::manager(vec![RestaurantId::new(2), RestaurantId::new(3)])
    );
    assert_eq!(directory.len(), 3);
}

#[test]
fn test_blank_or_unknown_token_fails_authentication() {
    let directory: StaffDirectory = create_test_directory();

    let blank: ApiError = AuthenticationService::validate_session(&directory, "  ").unwrap_err();
    let unknown: ApiError =
        AuthenticationService::validate_session(&directory, "guess").unwrap_err();

    assert_eq!(
        blank,
        ApiError::AuthenticationFailed {
            reason: String::from("Missing authorization token"),
        }
    );
    assert_eq!(
        unknown,
        ApiError::AuthenticationFailed {
            reason: String::from("Invalid user session"),
        }
    );
}

#[test]
fn test_authorization_follows_restaurant_scope() {
    let notice: Notice = create_test_notice(3);

    assert!(AuthorizationService::authorize_notice(&ManagerAccess::owner(), &notice).is_ok());
    assert!(
        AuthorizationService::authorize_notice(
            &ManagerAccess::manager(vec![RestaurantId::new(3)]),
            &notice
        )
        .is_ok()
    );
    assert_eq!(
        AuthorizationService::authorize_notice(
            &ManagerAccess::manager(vec![RestaurantId::new(1)]),
            &notice
        ),
        Err(ApiError::Unauthorized {
            notice_id: String::from("n-1"),
        })
    );
}

#[test]
fn test_later_grant_replaces_earlier_one() {
    let directory: StaffDirectory = ["floor=1", "floor=owner"]
        .into_iter()
        .map(|raw| raw.parse::<StaffGrant>().unwrap())
        .collect();

    assert_eq!(directory.len(), 1);
    assert!(directory.contains("floor"));
    assert_eq!(
        AuthenticationService::validate_session(&directory, "floor").unwrap(),
        ManagerAccess::owner()
    );
}
