//! Virtual Power Meter Dashboard
//!
//! Browser dashboard for the power-metering simulator, built with Leptos
//! (WASM).
//!
//! # Features
//!
//! - Start/stop control of the simulator backend
//! - Status polling with a live indicator
//! - Real-time register feed over WebSocket with bounded reconnection
//! - Scrolling realtime chart of measured values
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to the simulator backend over HTTP (`/api/*`) and a
//! WebSocket feed (`/ws`); the backend itself lives in a separate process.

use leptos::*;

pub mod api;
pub mod app;
pub mod components;
pub mod format;
pub mod pages;
pub mod state;
pub mod storage;

/// Mount the dashboard application to the document body.
pub fn mount() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
