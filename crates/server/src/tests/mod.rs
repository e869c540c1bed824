// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode as HttpStatusCode},
};
use serde_json::{Value, json};
use std::sync::Mutex as StdMutex;
use table_notice_domain::NoticeStatus;
use tower::ServiceExt;

const OWNER: &str = "owner-token";
const FLOOR_ONE: &str = "floor-one";
const FLOOR_TWO: &str = "floor-two";

/// Remembers which notices were announced.
#[derive(Default)]
struct RecordingNotifier {
    notified: StdMutex<Vec<NoticeId>>,
}

impl RecordingNotifier {
    fn count(&self) -> usize {
        self.notified.lock().unwrap().len()
    }
}

impl DinerNotifier for RecordingNotifier {
    fn notify_diner_of_update(&self, notice_id: &NoticeId) {
        self.notified.lock().unwrap().push(notice_id.clone());
    }
}

fn create_test_staff() -> StaffDirectory {
    [
        format!("{OWNER}=owner"),
        format!("{FLOOR_ONE}=1"),
        format!("{FLOOR_TWO}=2"),
    ]
    .iter()
    .map(|raw| raw.parse::<StaffGrant>().unwrap())
    .collect()
}

/// Helper to create test app state with in-memory persistence.
fn create_test_app_state() -> (AppState, Arc<RecordingNotifier>) {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    let notifier: Arc<RecordingNotifier> = Arc::new(RecordingNotifier::default());
    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        notifier: notifier.clone(),
        staff: Arc::new(create_test_staff()),
    };
    (app_state, notifier)
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<&Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, request: Request<Body>) -> (HttpStatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status: HttpStatusCode = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };
    (status, body)
}

/// Sends a staff action as `token`.
async fn staff_post(
    app: &Router,
    token: &str,
    uri: &str,
    body: Option<&Value>,
) -> (HttpStatusCode, Value) {
    send(app, request("POST", uri, Some(token), body)).await
}

fn notice_body(id: &str, restaurant_id: i64) -> Value {
    json!({
        "id": id,
        "restaurantId": restaurant_id,
        "customerName": "Jordan",
        "tableNumber": "12",
        "userId": "user-7",
        "items": ["Pad thai", "Spring rolls"],
        "allergies": ["peanut"],
    })
}

/// Creates a notice and walks it to the server station as the diner.
async fn create_submitted(app: &Router, id: &str, restaurant_id: i64) {
    let (status, _) = send(
        app,
        request("POST", "/api/notices", None, Some(&notice_body(id, restaurant_id))),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CREATED);

    let (status, _) = send(
        app,
        request(
            "POST",
            &format!("/api/notices/{id}/diner/server-code"),
            None,
            Some(&json!({ "code": "4412" })),
        ),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);

    let (status, body) = send(
        app,
        request("POST", &format!("/api/notices/{id}/diner/submit"), None, None),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["status"], "awaiting_server_approval");
}

#[tokio::test]
async fn test_create_notice_returns_draft() {
    let (app_state, notifier) = create_test_app_state();
    let app: Router = build_router(app_state);

    let (status, body) = send(
        &app,
        request("POST", "/api/notices", None, Some(&notice_body("n-1", 3))),
    )
    .await;

    assert_eq!(status, HttpStatusCode::CREATED);
    assert_eq!(body["status"], "draft");
    assert_eq!(body["restaurantId"], 3);
    assert_eq!(body["items"], json!(["Pad thai", "Spring rolls"]));
    assert_eq!(notifier.count(), 0);
}

#[tokio::test]
async fn test_create_notice_without_restaurant_is_bad_request() {
    let (app_state, _) = create_test_app_state();
    let app: Router = build_router(app_state);

    let (status, body) = send(
        &app,
        request("POST", "/api/notices", None, Some(&json!({ "id": "n-1" }))),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_value(body).unwrap();
    assert!(error.error);
    assert_eq!(error.message, "Order is missing restaurant id.");
}

#[tokio::test]
async fn test_full_kitchen_flow_notifies_on_every_step() {
    let (app_state, notifier) = create_test_app_state();
    let app: Router = build_router(app_state);
    create_submitted(&app, "n-1", 1).await;

    for path in ["server/approve", "server/dispatch"] {
        let (status, _) =
            staff_post(&app, FLOOR_ONE, &format!("/api/notices/n-1/{path}"), None).await;
        assert_eq!(status, HttpStatusCode::OK);
    }

    let (status, body) = staff_post(
        &app,
        FLOOR_ONE,
        "/api/notices/n-1/kitchen/question",
        Some(&json!({ "question": "Is sesame oil ok?" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["status"], "awaiting_user_response");

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/notices/n-1/diner/respond",
            None,
            Some(&json!({ "response": "Yes" })),
        ),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["status"], "question_answered");
    assert_eq!(body["kitchenQuestion"]["response"], "yes");

    let (status, body) = staff_post(
        &app,
        FLOOR_ONE,
        "/api/notices/n-1/kitchen/acknowledge",
        Some(&json!({ "chefId": "c1", "chefName": "Alex", "role": "Line cook" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["status"], "acknowledged");
    assert_eq!(body["faceIdAudit"][0]["chefName"], "Alex");

    // server-code, submit, approve, dispatch, question, respond, acknowledge
    assert_eq!(notifier.count(), 7);
}

#[tokio::test]
async fn test_staff_routes_require_a_session() {
    let (app_state, notifier) = create_test_app_state();
    let app: Router = build_router(app_state.clone());
    create_submitted(&app, "n-1", 1).await;
    let before: usize = notifier.count();

    let (list, _) = send(&app, request("GET", "/api/notices", None, None)).await;
    let (get, _) = send(&app, request("GET", "/api/notices/n-1", None, None)).await;
    let (reject, body) = send(
        &app,
        request(
            "POST",
            "/api/notices/n-1/server/reject",
            None,
            Some(&json!({ "reason": "nope" })),
        ),
    )
    .await;
    let (unknown, _) = staff_post(&app, "guess", "/api/notices/n-1/server/approve", None).await;

    assert_eq!(list, HttpStatusCode::UNAUTHORIZED);
    assert_eq!(get, HttpStatusCode::UNAUTHORIZED);
    assert_eq!(reject, HttpStatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Missing authorization token");
    assert_eq!(unknown, HttpStatusCode::UNAUTHORIZED);
    assert_eq!(notifier.count(), before);

    let stored: Notice = app_state
        .persistence
        .lock()
        .await
        .get_notice(&NoticeId::new("n-1"))
        .unwrap()
        .unwrap();
    assert_eq!(stored.status(), NoticeStatus::AwaitingServerApproval);
}

#[tokio::test]
async fn test_staff_of_another_restaurant_is_forbidden() {
    let (app_state, notifier) = create_test_app_state();
    let app: Router = build_router(app_state.clone());
    create_submitted(&app, "n-1", 1).await;
    let before: usize = notifier.count();

    let (get, _) = send(&app, request("GET", "/api/notices/n-1", Some(FLOOR_TWO), None)).await;
    let (reject, body) = staff_post(
        &app,
        FLOOR_TWO,
        "/api/notices/n-1/server/reject",
        Some(&json!({ "reason": "nope" })),
    )
    .await;

    assert_eq!(get, HttpStatusCode::FORBIDDEN);
    assert_eq!(reject, HttpStatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Not authorized for notice 'n-1'");
    assert_eq!(notifier.count(), before);

    let stored: Notice = app_state
        .persistence
        .lock()
        .await
        .get_notice(&NoticeId::new("n-1"))
        .unwrap()
        .unwrap();
    assert_eq!(stored.status(), NoticeStatus::AwaitingServerApproval);
}

#[tokio::test]
async fn test_refused_transition_is_conflict_and_not_stored() {
    let (app_state, notifier) = create_test_app_state();
    let app: Router = build_router(app_state.clone());
    create_submitted(&app, "n-1", 1).await;
    let before: usize = notifier.count();

    let (status, body) = staff_post(
        &app,
        FLOOR_ONE,
        "/api/notices/n-1/kitchen/acknowledge",
        Some(&json!({})),
    )
    .await;

    assert_eq!(status, HttpStatusCode::CONFLICT);
    assert_eq!(body["message"], "Kitchen can only acknowledge active orders.");
    assert_eq!(notifier.count(), before);

    let stored: Notice = app_state
        .persistence
        .lock()
        .await
        .get_notice(&NoticeId::new("n-1"))
        .unwrap()
        .unwrap();
    assert_eq!(stored.status(), NoticeStatus::AwaitingServerApproval);
}

#[tokio::test]
async fn test_blank_question_is_bad_request() {
    let (app_state, _) = create_test_app_state();
    let app: Router = build_router(app_state);
    create_submitted(&app, "n-1", 1).await;
    staff_post(&app, OWNER, "/api/notices/n-1/server/approve", None).await;
    staff_post(&app, OWNER, "/api/notices/n-1/server/dispatch", None).await;

    let (status, body) = staff_post(
        &app,
        OWNER,
        "/api/notices/n-1/kitchen/question",
        Some(&json!({ "question": "  " })),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Question text is required.");
}

#[tokio::test]
async fn test_invalid_answer_is_bad_request() {
    let (app_state, _) = create_test_app_state();
    let app: Router = build_router(app_state);
    create_submitted(&app, "n-1", 1).await;

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/notices/n-1/diner/respond",
            None,
            Some(&json!({ "response": "maybe" })),
        ),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_server_reject_then_rescind_is_conflict() {
    let (app_state, _) = create_test_app_state();
    let app: Router = build_router(app_state);
    create_submitted(&app, "n-1", 1).await;

    let (status, body) = staff_post(
        &app,
        FLOOR_ONE,
        "/api/notices/n-1/server/reject",
        Some(&json!({ "reason": "Kitchen closed" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["status"], "rejected_by_server");
    assert!(body["rejectedAt"].is_string());

    let (status, _) = send(
        &app,
        request("POST", "/api/notices/n-1/diner/rescind", None, None),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CONFLICT);
}

#[tokio::test]
async fn test_unknown_notice_is_not_found() {
    let (app_state, _) = create_test_app_state();
    let app: Router = build_router(app_state);

    let (get_status, _) =
        send(&app, request("GET", "/api/notices/missing", Some(OWNER), None)).await;
    let (post_status, _) =
        staff_post(&app, OWNER, "/api/notices/missing/server/approve", None).await;

    assert_eq!(get_status, HttpStatusCode::NOT_FOUND);
    assert_eq!(post_status, HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_listing_is_scoped_by_session() {
    let (app_state, _) = create_test_app_state();
    let app: Router = build_router(app_state);
    for (id, restaurant) in [("a", 1), ("b", 2), ("c", 1)] {
        send(
            &app,
            request("POST", "/api/notices", None, Some(&notice_body(id, restaurant))),
        )
        .await;
    }

    let (_, owner) = send(&app, request("GET", "/api/notices", Some(OWNER), None)).await;
    let (_, scoped) = send(&app, request("GET", "/api/notices", Some(FLOOR_ONE), None)).await;
    // A manager cannot widen their own scope from the query string.
    let (_, widened) = send(
        &app,
        request(
            "GET",
            "/api/notices?owner=true&restaurant_ids=1,2",
            Some(FLOOR_TWO),
            None,
        ),
    )
    .await;

    assert_eq!(owner.as_array().unwrap().len(), 3);
    let scoped_ids: Vec<&str> = scoped
        .as_array()
        .unwrap()
        .iter()
        .map(|notice| notice["id"].as_str().unwrap())
        .collect();
    assert_eq!(scoped_ids.len(), 2);
    assert!(scoped_ids.contains(&"a"));
    assert!(scoped_ids.contains(&"c"));
    let widened: &Vec<Value> = widened.as_array().unwrap();
    assert_eq!(widened.len(), 1);
    assert_eq!(widened[0]["id"], "b");
}

fn diner_notice_request(token: Option<&str>, body: &Value) -> Request<Body> {
    request("POST", "/api/notifications/diner-notice", token, Some(body))
}

#[tokio::test]
async fn test_diner_notice_requires_a_session() {
    let (app_state, _) = create_test_app_state();
    let app: Router = build_router(app_state);
    create_submitted(&app, "n-1", 1).await;

    let (missing, _) = send(&app, diner_notice_request(None, &json!({ "orderId": "n-1" }))).await;
    let (wrong, _) = send(
        &app,
        diner_notice_request(Some("guess"), &json!({ "orderId": "n-1" })),
    )
    .await;

    assert_eq!(missing, HttpStatusCode::UNAUTHORIZED);
    assert_eq!(wrong, HttpStatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_diner_notice_for_another_restaurant_is_forbidden() {
    let (app_state, _) = create_test_app_state();
    let app: Router = build_router(app_state);
    create_submitted(&app, "n-1", 1).await;

    let (status, _) = send(
        &app,
        diner_notice_request(Some(FLOOR_TWO), &json!({ "orderId": "n-1" })),
    )
    .await;

    assert_eq!(status, HttpStatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_diner_notice_outcomes() {
    let (app_state, _) = create_test_app_state();
    let app: Router = build_router(app_state);
    create_submitted(&app, "n-1", 1).await;
    let mut anonymous: Value = notice_body("n-2", 1);
    anonymous["userId"] = Value::Null;
    send(&app, request("POST", "/api/notices", None, Some(&anonymous))).await;

    let (missing_id, _) = send(&app, diner_notice_request(Some(FLOOR_ONE), &json!({}))).await;
    let (unknown, _) = send(
        &app,
        diner_notice_request(Some(FLOOR_ONE), &json!({ "orderId": "nope" })),
    )
    .await;
    let (skipped_status, skipped) = send(
        &app,
        diner_notice_request(Some(FLOOR_ONE), &json!({ "orderId": "n-2" })),
    )
    .await;
    let (sent_status, sent) = send(
        &app,
        diner_notice_request(Some(FLOOR_ONE), &json!({ "orderId": "n-1" })),
    )
    .await;

    assert_eq!(missing_id, HttpStatusCode::BAD_REQUEST);
    assert_eq!(unknown, HttpStatusCode::NOT_FOUND);
    assert_eq!(skipped_status, HttpStatusCode::OK);
    assert_eq!(skipped, json!({ "skipped": true, "reason": "no_user" }));
    assert_eq!(sent_status, HttpStatusCode::OK);
    assert_eq!(
        sent,
        json!({ "success": true, "pushesSent": 0, "iosPushesSent": 0 })
    );
}

#[test]
fn test_args_defaults() {
    let args: Args = Args::parse_from(["table-notice-server"]);

    assert_eq!(args.port, 3000);
    assert!(args.database.is_none());
    assert!(args.notify_endpoint.is_none());
    assert!(args.notify_token.is_none());
    assert!(args.staff_tokens.is_empty());
}

#[test]
fn test_args_collect_staff_tokens() {
    let args: Args = Args::parse_from([
        "table-notice-server",
        "--staff-token",
        "boss=owner",
        "--staff-token",
        "floor=1,2",
    ]);

    let staff: StaffDirectory = args.staff_tokens.into_iter().collect();
    assert_eq!(staff.len(), 2);
    assert!(staff.contains("boss"));
    assert!(staff.contains("floor"));
}

#[test]
fn test_args_reject_malformed_staff_token() {
    let result = Args::try_parse_from(["table-notice-server", "--staff-token", "floor=x"]);

    assert!(result.is_err());
}
