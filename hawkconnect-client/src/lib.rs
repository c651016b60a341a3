//! HTTP gateway to the Hawk Connect backend.
//!
//! [`ApiClient`] is the production implementation of [`HawkConnectApi`]. It is
//! constructed explicitly and handed to whatever issues requests; there is no
//! process-wide instance.

pub mod api;
pub mod client;
mod record;

pub use api::HawkConnectApi;
pub use client::{ApiClient, ApiError, DEFAULT_BASE_URL, Endpoint};
pub use reqwest::StatusCode;
