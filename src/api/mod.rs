//! HTTP API
//!
//! Client plumbing for the simulator control API.

pub mod client;

pub use client::{
    api_request, fetch_status, start_simulator, stop_simulator, ApiError, ControlResponse,
    HttpMethod, RequestOptions, StatusSnapshot,
};
