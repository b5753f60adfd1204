//! accessctl
//!
//! Submits an access request to the authorization server for a named user,
//! optionally waiting for the user to have an entry first and auto-approving
//! the request it just created.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use accessctl_api::{Client, ClientConfig, Credentials};
use accessctl_cli::config::{RunConfig, split_list};
use accessctl_cli::flow;

#[derive(Parser, Debug)]
#[command(name = "accessctl")]
#[command(version, about = "Submit and approve access requests", long_about = None)]
struct Cli {
    /// Authorization server address (e.g. "authz.example.com:443")
    #[arg(long, env = "ACCESSCTL_PROXY", value_parser = NonEmptyStringValueParser::new())]
    proxy: String,

    /// Target user to request access for
    #[arg(long, env = "ACCESSCTL_USER", value_parser = NonEmptyStringValueParser::new())]
    user: String,

    /// Comma-delimited roles to request
    #[arg(long, env = "ACCESSCTL_ROLES", value_parser = NonEmptyStringValueParser::new())]
    roles: String,

    /// Comma-delimited resource ids to scope the request to
    #[arg(long, env = "ACCESSCTL_RESOURCES", default_value = "")]
    resources: String,

    /// Identity file for authenticating; omit to use the local profile
    #[arg(long, env = "ACCESSCTL_IDENTITY")]
    identity: Option<PathBuf>,

    /// Wait for the user to have an entry instead of failing fast
    #[arg(long, env = "ACCESSCTL_WAIT_FOR_USER", default_value_t = true, action = clap::ArgAction::Set)]
    wait_for_user: bool,

    /// Seconds to wait between user-list polls
    #[arg(long, env = "ACCESSCTL_POLL_INTERVAL", default_value_t = 5)]
    poll_interval: u64,

    /// Submit an approval review for the created request
    #[arg(long, env = "ACCESSCTL_APPROVE_REQUEST", default_value_t = true, action = clap::ArgAction::Set)]
    approve_request: bool,

    /// Output logs as JSON (for structured log aggregation)
    #[arg(long, env = "ACCESSCTL_LOG_JSON")]
    log_json: bool,
}

impl Cli {
    fn into_run_config(self) -> RunConfig {
        RunConfig {
            proxy: self.proxy,
            user: self.user,
            roles: split_list(&self.roles),
            resource_ids: split_list(&self.resources),
            identity: self.identity,
            wait_for_user: self.wait_for_user,
            poll_interval: Duration::from_secs(self.poll_interval),
            approve_request: self.approve_request,
        }
    }
}

/// Initialise the global tracing subscriber.
fn init_tracing(log_json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "accessctl_cli=info,accessctl_api=info".into()),
    );
    if log_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = cli.into_run_config();
    info!(
        proxy = %config.proxy,
        user = %config.user,
        roles = ?config.roles,
        "Submitting access request"
    );

    let credentials = match &config.identity {
        Some(path) => Credentials::from_identity_file(path),
        None => Credentials::from_profile("", ""),
    }
    .map_err(|e| anyhow::anyhow!("failed to load credentials: {e}"))?;

    let client = Client::connect(&ClientConfig::new(config.proxy.clone(), credentials))
        .map_err(|e| anyhow::anyhow!("failed to create client: {e}"))?;

    // Ctrl-C cancels the (potentially unbounded) user poll instead of
    // leaving the process to be killed mid-sleep.
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_cancel.cancel();
        }
    });

    let outcome = flow::run(&client, &config, &cancel).await?;
    info!(
        request_id = %outcome.request_id,
        state = ?outcome.final_state,
        "Access request flow complete"
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn full_args() -> Vec<&'static str> {
        vec![
            "accessctl",
            "--proxy",
            "authz.test:443",
            "--user",
            "alice",
            "--roles",
            "editor,viewer",
        ]
    }

    #[test]
    fn missing_required_flags_fail_parse() {
        let err = Cli::try_parse_from(["accessctl"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn missing_roles_fails_parse() {
        let err =
            Cli::try_parse_from(["accessctl", "--proxy", "p:443", "--user", "alice"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn empty_required_value_rejected() {
        let result = Cli::try_parse_from([
            "accessctl",
            "--proxy",
            "",
            "--user",
            "alice",
            "--roles",
            "editor",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn defaults_match_documented_behavior() {
        let cli = Cli::try_parse_from(full_args()).unwrap();
        assert!(cli.wait_for_user);
        assert!(cli.approve_request);
        assert_eq!(cli.poll_interval, 5);
        assert!(cli.identity.is_none());
        assert!(cli.resources.is_empty());
        assert!(!cli.log_json);
    }

    #[test]
    fn boolean_flags_are_settable() {
        let mut args = full_args();
        args.extend(["--wait-for-user", "false", "--approve-request", "false"]);
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(!cli.wait_for_user);
        assert!(!cli.approve_request);
    }

    #[test]
    fn run_config_splits_roles_and_converts_interval() {
        let mut args = full_args();
        args.extend(["--poll-interval", "2"]);
        let config = Cli::try_parse_from(args).unwrap().into_run_config();
        assert_eq!(config.roles, vec!["editor", "viewer"]);
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert!(config.resource_ids.is_empty());
    }
}
