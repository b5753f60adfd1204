//! Credential loading: identity files and locally cached profiles.
//!
//! An identity file is an explicit JSON bundle handed to the tool; a profile
//! is the same bundle cached under `~/.accessctl/` by a previous login.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Credential bundle used to authenticate to the authorization server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub user: String,
    pub token: String,
}

impl Credentials {
    /// Load credentials from an explicit identity file.
    pub fn from_identity_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Credentials(format!("cannot read identity file {}: {e}", path.display()))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            Error::Credentials(format!("malformed identity file {}: {e}", path.display()))
        })
    }

    /// Load credentials from a locally cached profile.
    ///
    /// An empty `name` means the `default` profile; an empty `dir` means
    /// `~/.accessctl`. There is no interactive login path, so a missing
    /// profile is an error.
    pub fn from_profile(name: &str, dir: &str) -> Result<Self> {
        let path = Self::profile_path(name, dir)
            .ok_or_else(|| Error::Credentials("cannot determine home directory".into()))?;
        let raw = std::fs::read_to_string(&path).map_err(|e| {
            Error::Credentials(format!("cannot read profile {}: {e}", path.display()))
        })?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::Credentials(format!("malformed profile {}: {e}", path.display())))
    }

    /// Resolve the profile file path: `{dir}/{name}.json`.
    pub fn profile_path(name: &str, dir: &str) -> Option<PathBuf> {
        let dir = if dir.is_empty() {
            dirs::home_dir()?.join(".accessctl")
        } else {
            PathBuf::from(dir)
        };
        let name = if name.is_empty() { "default" } else { name };
        Some(dir.join(format!("{name}.json")))
    }
}
