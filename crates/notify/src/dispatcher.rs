// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use serde::Serialize;
use table_notice_domain::NoticeId;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::DinerNotifier;
use crate::error::NotificationError;
use crate::token::TokenSource;

/// Where notifications go and how failures are labelled in logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    /// Full URL of the diner-notice endpoint.
    pub endpoint: String,
    /// Prefix identifying the caller in failure logs.
    pub log_label: String,
}

impl NotifierConfig {
    #[must_use]
    pub fn new(endpoint: impl Into<String>, log_label: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            log_label: log_label.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NotifyRequest<'a> {
    order_id: &'a str,
}

/// A failed notification on its way to the log sink.
struct Failure {
    notice_id: NoticeId,
    error: NotificationError,
}

/// Sends diner notifications over HTTP without blocking the caller.
///
/// Every call to [`NotificationDispatcher::dispatch`] runs on a detached
/// task. Failures are passed over a channel to a single logging task and
/// go nowhere else.
#[derive(Clone)]
pub struct NotificationDispatcher {
    client: reqwest::Client,
    config: Arc<NotifierConfig>,
    tokens: Arc<dyn TokenSource>,
    failures: mpsc::UnboundedSender<Failure>,
}

impl NotificationDispatcher {
    /// Creates a dispatcher and starts its log sink.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(config: NotifierConfig, tokens: Arc<dyn TokenSource>) -> Self {
        let (failures, receiver) = mpsc::unbounded_channel();
        tokio::spawn(log_failures(config.log_label.clone(), receiver));

        Self {
            client: reqwest::Client::new(),
            config: Arc::new(config),
            tokens,
            failures,
        }
    }

    /// Sends one notification and waits for the endpoint's answer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - no token is available
    /// - the request fails in transit
    /// - the endpoint answers with a non-success status
    pub async fn send(&self, notice_id: &NoticeId) -> Result<(), NotificationError> {
        let token: String = self
            .tokens
            .access_token()
            .ok_or(NotificationError::MissingToken)?;

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(token)
            .json(&NotifyRequest {
                order_id: notice_id.as_str(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotificationError::Rejected {
                status: status.as_u16(),
            });
        }

        debug!(notice_id = %notice_id, "Diner notification accepted");
        Ok(())
    }

    /// Starts a notification on a detached task.
    ///
    /// The handle is only useful to tests; dropping it does not cancel
    /// the task.
    pub fn dispatch(&self, notice_id: &NoticeId) -> JoinHandle<()> {
        let dispatcher: Self = self.clone();
        let notice_id: NoticeId = notice_id.clone();

        tokio::spawn(async move {
            if let Err(error) = dispatcher.send(&notice_id).await {
                if dispatcher
                    .failures
                    .send(Failure { notice_id, error })
                    .is_err()
                {
                    debug!("Notification failure sink closed");
                }
            }
        })
    }
}

impl DinerNotifier for NotificationDispatcher {
    fn notify_diner_of_update(&self, notice_id: &NoticeId) {
        drop(self.dispatch(notice_id));
    }
}

async fn log_failures(label: String, mut receiver: mpsc::UnboundedReceiver<Failure>) {
    while let Some(Failure { notice_id, error }) = receiver.recv().await {
        match &error {
            NotificationError::MissingToken => {
                warn!(notice_id = %notice_id, "{label}: {error}");
            }
            NotificationError::Rejected { .. } | NotificationError::Transport(_) => {
                error!(notice_id = %notice_id, "{label}: {error}");
            }
        }
    }
}
