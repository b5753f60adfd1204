//! accessctl CLI library.
//!
//! Submits an access request to the authorization server for a named user,
//! optionally waiting for the user to exist and auto-approving the request.

pub mod config;
pub mod flow;
