//! Wire types for the authorization server API.
//!
//! Serde structs matching the server's JSON request and response bodies.

use serde::{Deserialize, Serialize};

/// User record returned by the server (subset of fields).
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub name: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Response to the liveness ping.
#[derive(Debug, Clone, Deserialize)]
pub struct PingResponse {
    pub server_version: String,
    #[serde(default)]
    pub cluster_name: String,
}

/// Review state of an access request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestState {
    #[default]
    Pending,
    Approved,
    Denied,
}

/// A request that a user be granted a set of roles, pending review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessRequest {
    pub id: String,
    pub user: String,
    pub roles: Vec<String>,
    /// Resource ids the request is scoped to. Normally empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource_ids: Vec<String>,
    #[serde(default)]
    pub state: RequestState,
}

/// A review decision attached to an access request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessReview {
    pub proposed_state: RequestState,
    pub reason: String,
    /// Unix seconds at submission time.
    pub created: i64,
}

/// Envelope for submitting a review against an existing request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSubmission {
    pub request_id: String,
    pub review: AccessReview,
}
