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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod session;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use table_notice::Command;
use table_notice_api::{
    AcknowledgeRequest, ApiError, AskQuestionRequest, CreateNoticeRequest, DinerNoticeOutcome,
    DinerNoticeRequest, DinerNoticeResponse, RejectRequest, RespondRequest, ServerCodeRequest,
    StaffDirectory, StaffGrant, create_notice, diner_notice, get_staff_notice, list_notices,
    perform_staff_transition, perform_transition, translate_domain_error,
};
use table_notice_domain::{ManagerAccess, Notice, NoticeId, QuestionResponse};
use table_notice_notify::{
    DinerNotifier, DisabledNotifier, NotificationDispatcher, NotifierConfig, StaticToken,
    TokenSource,
};
use table_notice_persistence::Persistence;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::session::StaffSession;

/// Table Notice Server - HTTP server for allergy and diet notices
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// URL of the diner-notice endpoint. Diner notifications are disabled without it.
    #[arg(long)]
    notify_endpoint: Option<String>,

    /// Bearer token the notification dispatcher presents. It must also be
    /// registered with `--staff-token` for the endpoint to accept it.
    #[arg(long)]
    notify_token: Option<String>,

    /// Staff bearer token and its scope: `TOKEN=owner` or `TOKEN=1,2`. Repeatable.
    #[arg(long = "staff-token", value_name = "TOKEN=SCOPE")]
    staff_tokens: Vec<StaffGrant>,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The notice store.
    persistence: Arc<Mutex<Persistence>>,
    /// Told about every successful transition.
    notifier: Arc<dyn DinerNotifier>,
    /// Staff tokens accepted on staff routes.
    staff: Arc<StaffDirectory>,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidTransition { .. } => StatusCode::CONFLICT,
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Persistence { .. } => {
                error!(error = %err, "Persistence error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Runs a diner command against a stored notice and returns the notice as stored.
async fn run_diner_transition(
    app_state: &AppState,
    id: String,
    command: Command,
) -> Result<Json<Notice>, HttpError> {
    info!(notice_id = %id, command = command.name(), "Handling diner transition request");

    let notice_id: NoticeId = NoticeId::new(id);
    let mut persistence = app_state.persistence.lock().await;
    let notice: Notice = perform_transition(
        &mut persistence,
        app_state.notifier.as_ref(),
        &notice_id,
        command,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(notice))
}

/// Runs a server or kitchen command for an authenticated staff member.
async fn run_staff_transition(
    app_state: &AppState,
    access: &ManagerAccess,
    id: String,
    command: Command,
) -> Result<Json<Notice>, HttpError> {
    info!(notice_id = %id, command = command.name(), "Handling staff transition request");

    let notice_id: NoticeId = NoticeId::new(id);
    let mut persistence = app_state.persistence.lock().await;
    let notice: Notice = perform_staff_transition(
        &mut persistence,
        app_state.notifier.as_ref(),
        access,
        &notice_id,
        command,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(notice))
}

async fn handle_create_notice(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<CreateNoticeRequest>,
) -> Result<(StatusCode, Json<Notice>), HttpError> {
    info!(notice_id = %request.id, "Handling create_notice request");

    let mut persistence = app_state.persistence.lock().await;
    let notice: Notice = create_notice(&mut persistence, request, OffsetDateTime::now_utc())?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(notice)))
}

async fn handle_list_notices(
    AxumState(app_state): AxumState<AppState>,
    StaffSession(access): StaffSession,
) -> Result<Json<Vec<Notice>>, HttpError> {
    info!(
        owner = access.is_owner,
        restaurants = access.managed_restaurant_ids.len(),
        "Handling list_notices request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let notices: Vec<Notice> = list_notices(&mut persistence, &access)?;
    drop(persistence);

    Ok(Json(notices))
}

async fn handle_get_notice(
    AxumState(app_state): AxumState<AppState>,
    StaffSession(access): StaffSession,
    Path(id): Path<String>,
) -> Result<Json<Notice>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let notice: Notice = get_staff_notice(&mut persistence, &access, &NoticeId::new(id))?;
    drop(persistence);

    Ok(Json(notice))
}

async fn handle_server_approve(
    AxumState(app_state): AxumState<AppState>,
    StaffSession(access): StaffSession,
    Path(id): Path<String>,
) -> Result<Json<Notice>, HttpError> {
    run_staff_transition(&app_state, &access, id, Command::Approve).await
}

async fn handle_server_dispatch(
    AxumState(app_state): AxumState<AppState>,
    StaffSession(access): StaffSession,
    Path(id): Path<String>,
) -> Result<Json<Notice>, HttpError> {
    run_staff_transition(&app_state, &access, id, Command::Dispatch).await
}

async fn handle_server_reject(
    AxumState(app_state): AxumState<AppState>,
    StaffSession(access): StaffSession,
    Path(id): Path<String>,
    Json(request): Json<RejectRequest>,
) -> Result<Json<Notice>, HttpError> {
    run_staff_transition(&app_state, &access, id, request.into_server_command()).await
}

async fn handle_kitchen_acknowledge(
    AxumState(app_state): AxumState<AppState>,
    StaffSession(access): StaffSession,
    Path(id): Path<String>,
    Json(request): Json<AcknowledgeRequest>,
) -> Result<Json<Notice>, HttpError> {
    let command: Command = Command::Acknowledge {
        staff: request.staff(),
    };
    run_staff_transition(&app_state, &access, id, command).await
}

async fn handle_kitchen_question(
    AxumState(app_state): AxumState<AppState>,
    StaffSession(access): StaffSession,
    Path(id): Path<String>,
    Json(request): Json<AskQuestionRequest>,
) -> Result<Json<Notice>, HttpError> {
    let command: Command = Command::AskQuestion {
        question: request.question,
    };
    run_staff_transition(&app_state, &access, id, command).await
}

async fn handle_kitchen_reject(
    AxumState(app_state): AxumState<AppState>,
    StaffSession(access): StaffSession,
    Path(id): Path<String>,
    Json(request): Json<RejectRequest>,
) -> Result<Json<Notice>, HttpError> {
    run_staff_transition(&app_state, &access, id, request.into_kitchen_command()).await
}

async fn handle_diner_server_code(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ServerCodeRequest>,
) -> Result<Json<Notice>, HttpError> {
    let command: Command = Command::AssignServerCode { code: request.code };
    run_diner_transition(&app_state, id, command).await
}

async fn handle_diner_submit(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Notice>, HttpError> {
    run_diner_transition(&app_state, id, Command::Submit).await
}

async fn handle_diner_respond(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Json(request): Json<RespondRequest>,
) -> Result<Json<Notice>, HttpError> {
    let response: QuestionResponse = request
        .response
        .parse()
        .map_err(|e| HttpError::from(translate_domain_error(e)))?;
    run_diner_transition(&app_state, id, Command::RespondToQuestion { response }).await
}

async fn handle_diner_rescind(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Notice>, HttpError> {
    run_diner_transition(&app_state, id, Command::Rescind).await
}

async fn handle_diner_notice(
    AxumState(app_state): AxumState<AppState>,
    StaffSession(access): StaffSession,
    body: Bytes,
) -> Result<Json<DinerNoticeResponse>, HttpError> {
    // An unreadable body is treated as empty.
    let request: DinerNoticeRequest = serde_json::from_slice(&body).unwrap_or_default();

    let mut persistence = app_state.persistence.lock().await;
    let outcome: DinerNoticeOutcome =
        diner_notice(&mut persistence, &access, request.order_id.as_deref())?;
    drop(persistence);

    Ok(Json(DinerNoticeResponse::from(&outcome)))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/api/notices",
            get(handle_list_notices).post(handle_create_notice),
        )
        .route("/api/notices/{id}", get(handle_get_notice))
        .route("/api/notices/{id}/server/approve", post(handle_server_approve))
        .route(
            "/api/notices/{id}/server/dispatch",
            post(handle_server_dispatch),
        )
        .route("/api/notices/{id}/server/reject", post(handle_server_reject))
        .route(
            "/api/notices/{id}/kitchen/acknowledge",
            post(handle_kitchen_acknowledge),
        )
        .route(
            "/api/notices/{id}/kitchen/question",
            post(handle_kitchen_question),
        )
        .route(
            "/api/notices/{id}/kitchen/reject",
            post(handle_kitchen_reject),
        )
        .route(
            "/api/notices/{id}/diner/server-code",
            post(handle_diner_server_code),
        )
        .route("/api/notices/{id}/diner/submit", post(handle_diner_submit))
        .route("/api/notices/{id}/diner/respond", post(handle_diner_respond))
        .route("/api/notices/{id}/diner/rescind", post(handle_diner_rescind))
        .route(
            "/api/notifications/diner-notice",
            post(handle_diner_notice),
        )
        .with_state(app_state)
}

/// Picks the dispatcher when an endpoint is configured.
fn build_notifier(args: &Args) -> Arc<dyn DinerNotifier> {
    let Some(endpoint) = &args.notify_endpoint else {
        info!("Diner notifications disabled");
        return Arc::new(DisabledNotifier);
    };

    info!(endpoint = %endpoint, "Diner notifications enabled");
    let tokens: Arc<dyn TokenSource> = Arc::new(
        args.notify_token
            .as_deref()
            .map_or_else(StaticToken::none, StaticToken::new),
    );
    Arc::new(NotificationDispatcher::new(
        NotifierConfig::new(endpoint.clone(), "Diner notice"),
        tokens,
    ))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Table Notice Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let staff: StaffDirectory = args.staff_tokens.iter().cloned().collect();
    info!(tokens = staff.len(), "Loaded staff tokens");
    if args
        .notify_token
        .as_deref()
        .is_some_and(|token| !staff.contains(token))
    {
        warn!("Notify token is not a registered staff token; diner-notice calls will be refused");
    }

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        notifier: build_notifier(&args),
        staff: Arc::new(staff),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
