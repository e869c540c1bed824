// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use table_notice::{Command, apply};
use table_notice_domain::{Notice, NoticeId, RestaurantId};
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

pub const START: OffsetDateTime = datetime!(2026-03-14 18:00:00 UTC);

pub fn minutes(n: i64) -> OffsetDateTime {
    START + Duration::minutes(n)
}

pub fn create_test_notice(id: &str, restaurant_id: i64, created_at: OffsetDateTime) -> Notice {
    let mut notice: Notice = Notice::new(
        NoticeId::new(id),
        Some(RestaurantId::new(restaurant_id)),
        created_at,
    );
    notice.customer_name = Some(String::from("Jordan"));
    notice.dining_mode = Some(String::from("dine-in"));
    notice.selected_dishes = vec![String::from("Grilled salmon"), String::from("Fries")];
    notice.allergies = vec![String::from("peanut"), String::from("sesame")];
    notice
}

/// A notice submitted by the diner and waiting on the server.
pub fn create_submitted_notice(id: &str, restaurant_id: i64) -> Notice {
    let draft: Notice = create_test_notice(id, restaurant_id, START);
    let waiting = apply(
        &draft,
        Command::AssignServerCode {
            code: String::from("4821"),
        },
        minutes(1),
    )
    .unwrap()
    .notice;
    apply(&waiting, Command::Submit, minutes(2)).unwrap().notice
}
