// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::sync::Mutex;

use table_notice::Command;
use table_notice_domain::{Notice, NoticeId};
use table_notice_notify::DinerNotifier;
use table_notice_persistence::Persistence;
use time::{Duration, OffsetDateTime, macros::datetime};

use crate::{CreateNoticeRequest, create_notice, perform_transition};

pub const START: OffsetDateTime = datetime!(2026-03-14 18:00 UTC);

pub fn minutes(n: i64) -> OffsetDateTime {
    START + Duration::minutes(n)
}

/// Remembers every notice id it was asked to announce.
#[derive(Default)]
pub struct RecordingNotifier {
    pub notified: Mutex<Vec<NoticeId>>,
}

impl RecordingNotifier {
    pub fn notified(&self) -> Vec<NoticeId> {
        self.notified.lock().unwrap().clone()
    }
}

impl DinerNotifier for RecordingNotifier {
    fn notify_diner_of_update(&self, notice_id: &NoticeId) {
        self.notified.lock().unwrap().push(notice_id.clone());
    }
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_test_request(id: &str, restaurant_id: i64) -> CreateNoticeRequest {
    CreateNoticeRequest {
        id: id.to_string(),
        restaurant_id: Some(restaurant_id),
        customer_name: Some(String::from("Jordan")),
        dining_mode: Some(String::from("dine-in")),
        table_number: Some(String::from("12")),
        user_id: Some(String::from("user-7")),
        items: vec![String::from("Pad thai")],
        allergies: vec![String::from("peanut")],
        diets: Vec::new(),
        notes: None,
    }
}

/// Stores a draft and walks it to the server station.
pub fn create_submitted_notice(persistence: &mut Persistence, id: &str) -> Notice {
    let notifier: RecordingNotifier = RecordingNotifier::default();
    create_notice(persistence, create_test_request(id, 1), START).unwrap();
    let notice_id: NoticeId = NoticeId::new(id);
    perform_transition(
        persistence,
        &notifier,
        &notice_id,
        Command::AssignServerCode {
            code: String::from("4412"),
        },
        minutes(1),
    )
    .unwrap();
    perform_transition(persistence, &notifier, &notice_id, Command::Submit, minutes(2)).unwrap()
}
