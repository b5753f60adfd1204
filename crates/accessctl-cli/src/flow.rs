//! Sequential request-submission flow.
//!
//! Ping the server, wait for the target user to appear, create the access
//! request, and optionally approve it. Generic over [`AccessApi`] so tests
//! can drive the flow with doubles instead of a live server.

use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::info;

use accessctl_api::{
    AccessRequest, AccessReview, Client, PingResponse, RequestState, ReviewSubmission,
    User,
};

use crate::config::RunConfig;

/// Remote operations the flow needs from the authorization server.
pub trait AccessApi {
    async fn ping(&self) -> accessctl_api::Result<PingResponse>;
    async fn get_users(&self) -> accessctl_api::Result<Vec<User>>;
    async fn create_access_request(&self, request: &AccessRequest) -> accessctl_api::Result<()>;
    async fn submit_access_review(
        &self,
        submission: &ReviewSubmission,
    ) -> accessctl_api::Result<AccessRequest>;
}

impl AccessApi for Client {
    async fn ping(&self) -> accessctl_api::Result<PingResponse> {
        Self::ping(self).await
    }

    async fn get_users(&self) -> accessctl_api::Result<Vec<User>> {
        Self::get_users(self).await
    }

    async fn create_access_request(&self, request: &AccessRequest) -> accessctl_api::Result<()> {
        Self::create_access_request(self, request).await
    }

    async fn submit_access_review(
        &self,
        submission: &ReviewSubmission,
    ) -> accessctl_api::Result<AccessRequest> {
        Self::submit_access_review(self, submission).await
    }
}

/// Flow errors. Every variant is fatal; nothing is recovered locally.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Api(#[from] accessctl_api::Error),

    #[error("user {0} not found")]
    UserNotFound(String),

    #[error("cancelled while waiting for user")]
    Cancelled,
}

/// Result of a completed run.
#[derive(Debug)]
pub struct Outcome {
    /// Generated access request id.
    pub request_id: String,
    /// State reported by the review submission, when auto-approval ran.
    pub final_state: Option<RequestState>,
}

/// Run the full flow: ping, wait for user, create request, optionally approve.
pub async fn run<A: AccessApi>(
    api: &A,
    config: &RunConfig,
    cancel: &CancellationToken,
) -> Result<Outcome, FlowError> {
    let pong = api.ping().await?;
    info!(server_version = %pong.server_version, cluster = %pong.cluster_name, "Connected to server");

    wait_for_user(api, config, cancel).await?;

    let request_id = uuid::Uuid::new_v4().to_string();
    let request = AccessRequest {
        id: request_id.clone(),
        user: config.user.clone(),
        roles: config.roles.clone(),
        resource_ids: config.resource_ids.clone(),
        state: RequestState::Pending,
    };
    api.create_access_request(&request).await?;
    info!(request_id = %request_id, user = %config.user, "Access request created");

    if !config.approve_request {
        return Ok(Outcome {
            request_id,
            final_state: None,
        });
    }

    let submission = ReviewSubmission {
        request_id: request_id.clone(),
        review: AccessReview {
            proposed_state: RequestState::Approved,
            reason: "Approved".to_string(),
            created: unix_now(),
        },
    };
    let updated = api.submit_access_review(&submission).await?;
    info!(request_id = %request_id, state = ?updated.state, "Access request reviewed");

    Ok(Outcome {
        request_id,
        final_state: Some(updated.state),
    })
}

/// Poll the user list until the target user appears.
///
/// A fetch error aborts immediately, even when waiting; only a successful
/// fetch without a match triggers another attempt. The loop is unbounded
/// while `wait_for_user` is set, so the sleep races the cancellation token.
async fn wait_for_user<A: AccessApi>(
    api: &A,
    config: &RunConfig,
    cancel: &CancellationToken,
) -> Result<(), FlowError> {
    loop {
        let users = api.get_users().await?;
        if users.iter().any(|u| u.name == config.user) {
            return Ok(());
        }
        if !config.wait_for_user {
            return Err(FlowError::UserNotFound(config.user.clone()));
        }
        info!(user = %config.user, "User not found, continuing to wait");
        tokio::select! {
            () = tokio::time::sleep(config.poll_interval) => {}
            () = cancel.cancelled() => return Err(FlowError::Cancelled),
        }
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
