//! Pages
//!
//! Top-level page components for each route.

pub mod dashboard;
pub mod monitor;
pub mod settings;

pub use dashboard::Dashboard;
pub use monitor::Monitor;
pub use settings::Settings;
