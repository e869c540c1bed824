// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

//! The boundary between transports and the notice workflow.
//!
//! Every handler reads the notice, applies a pure transition, writes the
//! result, and notifies the diner, translating lower-layer errors into
//! [`ApiError`] on the way out.

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticationService, AuthorizationService, StaffDirectory, StaffGrant};
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    create_notice, diner_notice, get_notice, get_staff_notice, list_notices,
    perform_staff_transition, perform_transition,
};
pub use request_response::{
    AcknowledgeRequest, AskQuestionRequest, CreateNoticeRequest, DinerNoticeOutcome,
    DinerNoticeRequest, DinerNoticeResponse, RejectRequest, RespondRequest, ServerCodeRequest,
};
