//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod chart;
pub mod nav;
pub mod status_indicator;
pub mod toast;

pub use chart::RealtimePowerChart;
pub use nav::Nav;
pub use status_indicator::StatusIndicator;
pub use toast::Toast;
