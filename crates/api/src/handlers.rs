// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.

use table_notice::{Command, TransitionResult, apply};
use table_notice_domain::{ManagerAccess, Notice, NoticeId, RestaurantId};
use table_notice_notify::{DinerMessage, DinerNotifier, build_diner_message};
use table_notice_persistence::Persistence;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::auth::AuthorizationService;
use crate::error::{ApiError, translate_core_error, translate_persistence_error};
use crate::request_response::{CreateNoticeRequest, DinerNoticeOutcome};

/// Stores a new draft notice.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The diner's notice details
/// * `at` - Creation time
///
/// # Returns
///
/// * `Ok(Notice)` with the stored draft
///
/// # Errors
///
/// Returns a validation error if the id is blank, already taken, or the
/// notice has no restaurant.
pub fn create_notice(
    persistence: &mut Persistence,
    request: CreateNoticeRequest,
    at: OffsetDateTime,
) -> Result<Notice, ApiError> {
    let id: String = request.id.trim().to_string();
    if id.is_empty() {
        return Err(ApiError::Validation {
            field: String::from("id"),
            message: String::from("Notice id is required."),
        });
    }

    let notice_id: NoticeId = NoticeId::new(id);
    if persistence
        .get_notice(&notice_id)
        .map_err(translate_persistence_error)?
        .is_some()
    {
        return Err(ApiError::Validation {
            field: String::from("id"),
            message: format!("A notice with id '{notice_id}' already exists."),
        });
    }

    let mut notice: Notice = Notice::new(
        notice_id,
        request.restaurant_id.map(RestaurantId::new),
        at,
    );
    notice.customer_name = request.customer_name;
    notice.dining_mode = request.dining_mode;
    notice.table_number = request.table_number;
    notice.user_id = request.user_id;
    notice.selected_dishes = request.items;
    notice.allergies = request.allergies;
    notice.diets = request.diets;
    notice.notes = request.notes;

    persistence
        .upsert_notice(&notice)
        .map_err(translate_persistence_error)?;

    Ok(notice)
}

/// Lists the notices a manager may see, oldest first.
///
/// # Errors
///
/// Returns a persistence error if the query fails or a stored row cannot
/// be decoded.
pub fn list_notices(
    persistence: &mut Persistence,
    access: &ManagerAccess,
) -> Result<Vec<Notice>, ApiError> {
    persistence
        .fetch_accessible_notices(access)
        .map_err(translate_persistence_error)
}

/// Loads a single notice.
///
/// # Errors
///
/// Returns `NotFound` if no notice has this id.
pub fn get_notice(persistence: &mut Persistence, notice_id: &NoticeId) -> Result<Notice, ApiError> {
    persistence
        .get_notice(notice_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::notice_not_found(notice_id.as_str()))
}

/// Loads a notice on behalf of staff.
///
/// # Errors
///
/// Returns `NotFound` if no notice has this id and `Unauthorized` if the
/// notice belongs to a restaurant outside `access`.
pub fn get_staff_notice(
    persistence: &mut Persistence,
    access: &ManagerAccess,
    notice_id: &NoticeId,
) -> Result<Notice, ApiError> {
    let notice: Notice = get_notice(persistence, notice_id)?;
    AuthorizationService::authorize_notice(access, &notice)?;
    Ok(notice)
}

/// Runs a diner action against a stored notice.
///
/// The notice is loaded, transitioned, written back, and only then is the
/// diner notified. A refused transition writes nothing and notifies
/// nobody.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `notifier` - Receives the notice id after a successful write
/// * `notice_id` - The notice to act on
/// * `command` - The actor's intent
/// * `at` - When the action happened
///
/// # Returns
///
/// * `Ok(Notice)` with the notice as stored
///
/// # Errors
///
/// Returns `NotFound` for an unknown id, `InvalidTransition` when the
/// status does not allow the action, `Validation` for bad input, or
/// `Persistence` if the write fails.
pub fn perform_transition(
    persistence: &mut Persistence,
    notifier: &dyn DinerNotifier,
    notice_id: &NoticeId,
    command: Command,
    at: OffsetDateTime,
) -> Result<Notice, ApiError> {
    let notice: Notice = get_notice(persistence, notice_id)?;
    transition_and_notify(persistence, notifier, &notice, command, at)
}

/// Runs a server or kitchen action on behalf of staff.
///
/// Behaves like [`perform_transition`] once the caller is known to
/// manage the notice's restaurant.
///
/// # Errors
///
/// Returns `Unauthorized` if the notice belongs to a restaurant outside
/// `access`, otherwise the same errors as [`perform_transition`].
pub fn perform_staff_transition(
    persistence: &mut Persistence,
    notifier: &dyn DinerNotifier,
    access: &ManagerAccess,
    notice_id: &NoticeId,
    command: Command,
    at: OffsetDateTime,
) -> Result<Notice, ApiError> {
    let notice: Notice = get_staff_notice(persistence, access, notice_id)?;
    transition_and_notify(persistence, notifier, &notice, command, at)
}

fn transition_and_notify(
    persistence: &mut Persistence,
    notifier: &dyn DinerNotifier,
    notice: &Notice,
    command: Command,
    at: OffsetDateTime,
) -> Result<Notice, ApiError> {
    let command_name: &'static str = command.name();

    let result: TransitionResult = apply(notice, command, at).map_err(translate_core_error)?;

    persistence
        .persist_transition(&result)
        .map_err(translate_persistence_error)?;

    debug!(
        notice_id = %notice.id(),
        command = command_name,
        status = %result.notice.status(),
        "Transition persisted"
    );

    notifier.notify_diner_of_update(notice.id());

    Ok(result.notice)
}

/// Builds the diner-facing update for a notice.
///
/// # Errors
///
/// Returns a validation error for a blank id, `NotFound` for an
/// unknown notice, and `Unauthorized` if the notice belongs to a
/// restaurant outside `access`.
pub fn diner_notice(
    persistence: &mut Persistence,
    access: &ManagerAccess,
    order_id: Option<&str>,
) -> Result<DinerNoticeOutcome, ApiError> {
    let order_id: &str = order_id.map(str::trim).unwrap_or_default();
    if order_id.is_empty() {
        return Err(ApiError::Validation {
            field: String::from("orderId"),
            message: String::from("Missing orderId"),
        });
    }

    let notice: Notice = get_staff_notice(persistence, access, &NoticeId::new(order_id))?;

    let Some(user_id) = notice
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|user| !user.is_empty())
    else {
        return Ok(DinerNoticeOutcome::NoUser);
    };

    let message: DinerMessage = build_diner_message(&notice);
    info!(
        notice_id = order_id,
        user_id,
        title = %message.title,
        body = %message.body,
        "Diner notice prepared"
    );

    Ok(DinerNoticeOutcome::Sent {
        user_id: user_id.to_string(),
        message,
    })
}
