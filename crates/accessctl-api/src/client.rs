//! Authorization server HTTP client.
//!
//! Uses reqwest to call the server's v1 endpoints for liveness, user
//! listing, access requests, and reviews.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::credentials::Credentials;
use crate::error::{Error, Result};
use crate::types::{AccessRequest, PingResponse, ReviewSubmission, User};

/// Configuration for connecting to an authorization server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server address (e.g., "authz.example.com:443"). A bare host:port is
    /// treated as https.
    pub addr: String,
    /// Credentials presented on every request.
    pub credentials: Credentials,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Config with default timeouts (5s connect, 30s per request).
    pub fn new(addr: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            addr: addr.into(),
            credentials,
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Client for the authorization server HTTP API.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Build a client from the given configuration.
    ///
    /// Validates the address and credentials and constructs the underlying
    /// HTTP client; no traffic is sent until the first call.
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        if config.addr.is_empty() {
            return Err(Error::Config("addr is empty".into()));
        }
        if config.credentials.token.is_empty() {
            return Err(Error::Config("credentials token is empty".into()));
        }

        let mut headers = HeaderMap::new();
        let token_val = HeaderValue::from_str(&format!("Bearer {}", config.credentials.token))
            .map_err(|_| Error::Config("Invalid token format".into()))?;
        headers.insert(AUTHORIZATION, token_val);

        // Ensure a TLS crypto provider is installed (reqwest uses rustls-no-provider).
        // The `Err` case just means it was already installed — safe to ignore.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;

        let base_url = Self::normalize_addr(&config.addr);
        Ok(Self { http, base_url })
    }

    /// Normalize an address into a base URL: strip trailing slashes and
    /// default to https when no scheme is given.
    pub(crate) fn normalize_addr(addr: &str) -> String {
        let trimmed = addr.trim_end_matches('/');
        if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        }
    }

    /// Build the v1 API URL for a given path.
    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}/v1{}", self.base_url, path)
    }

    /// Check HTTP response status, returning an error for non-success codes.
    /// The error carries the response body when the server sent one.
    pub(crate) async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                status.canonical_reason().unwrap_or("Unknown").to_string()
            } else {
                body
            };
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp)
    }

    /// Liveness round trip.
    pub async fn ping(&self) -> Result<PingResponse> {
        let resp = self.http.get(self.api_url("/ping")).send().await?;
        let resp = Self::check_status(resp).await?;
        Ok(resp.json().await?)
    }

    /// Fetch the full user list.
    pub async fn get_users(&self) -> Result<Vec<User>> {
        let resp = self.http.get(self.api_url("/users")).send().await?;
        let resp = Self::check_status(resp).await?;
        Ok(resp.json().await?)
    }

    /// Create a new access request.
    pub async fn create_access_request(&self, request: &AccessRequest) -> Result<()> {
        let resp = self
            .http
            .post(self.api_url("/accessrequests"))
            .json(request)
            .send()
            .await?;
        Self::check_status(resp).await?;
        Ok(())
    }

    /// Submit a review for an existing access request.
    ///
    /// Returns the request as updated by the review.
    pub async fn submit_access_review(
        &self,
        submission: &ReviewSubmission,
    ) -> Result<AccessRequest> {
        let url = self.api_url(&format!("/accessrequests/{}/reviews", submission.request_id));
        let resp = self.http.post(url).json(submission).send().await?;
        let resp = Self::check_status(resp).await?;
        Ok(resp.json().await?)
    }
}
