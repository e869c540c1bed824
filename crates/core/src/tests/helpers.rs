// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{diner, kitchen, server};
use table_notice_audit::StaffIdentity;
use table_notice_domain::{Notice, NoticeId, NoticeStatus, QuestionResponse, RestaurantId};
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

pub const START: OffsetDateTime = datetime!(2026-03-14 18:00:00 UTC);

pub fn minutes(n: i64) -> OffsetDateTime {
    START + Duration::minutes(n)
}

pub fn create_test_staff() -> StaffIdentity {
    StaffIdentity::new("c1", "Alex", "Line cook")
}

pub fn create_test_notice() -> Notice {
    let mut notice: Notice =
        Notice::new(NoticeId::new("notice-1"), Some(RestaurantId::new(5)), START);
    notice.customer_name = Some(String::from("Jordan"));
    notice.selected_dishes = vec![String::from("Grilled salmon")];
    notice.allergies = vec![String::from("peanut")];
    notice
}

/// Walks a fresh notice through real transitions until it reaches `status`.
pub fn create_notice_in(status: NoticeStatus) -> Notice {
    let draft: Notice = create_test_notice();
    let submitted = || {
        let waiting: Notice = diner::assign_server_code(&draft, "4821", minutes(1)).unwrap();
        diner::submit(&waiting, minutes(2)).unwrap()
    };
    let with_kitchen = || {
        let queued: Notice = server::approve(&submitted(), minutes(3)).unwrap();
        server::dispatch(&queued, minutes(4)).unwrap()
    };
    let asked = || kitchen::ask_question(&with_kitchen(), "Is butter ok?", minutes(5)).unwrap();

    match status {
        NoticeStatus::Draft => draft.clone(),
        NoticeStatus::AwaitingUserSubmission => {
            diner::assign_server_code(&draft, "4821", minutes(1)).unwrap()
        }
        NoticeStatus::AwaitingServerApproval => submitted(),
        NoticeStatus::QueuedForKitchen => server::approve(&submitted(), minutes(3)).unwrap(),
        NoticeStatus::WithKitchen => with_kitchen(),
        NoticeStatus::Acknowledged => {
            kitchen::acknowledge(&with_kitchen(), &create_test_staff(), minutes(5)).unwrap()
        }
        NoticeStatus::AwaitingUserResponse => asked(),
        NoticeStatus::QuestionAnswered => {
            diner::respond_to_question(&asked(), QuestionResponse::Yes, minutes(6)).unwrap()
        }
        NoticeStatus::RejectedByServer => server::reject(&submitted(), "", minutes(3)).unwrap(),
        NoticeStatus::RescindedByDiner => diner::rescind(&submitted(), minutes(3)).unwrap(),
        NoticeStatus::RejectedByKitchen => {
            kitchen::reject(&with_kitchen(), "", minutes(5)).unwrap()
        }
    }
}
