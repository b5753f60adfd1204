//! Authorization server client.
//!
//! Reqwest-based client for the accessctl HTTP API: liveness ping, user
//! listing, access request creation, and review submission.

mod client;
pub mod credentials;
mod error;
pub mod types;


pub use client::{Client, ClientConfig};
pub use credentials::Credentials;
pub use error::{Error, Result};
pub use types::{
    AccessRequest, AccessReview, PingResponse, RequestState, ReviewSubmission, User,
};
