//! State Management
//!
//! Global application state, WebSocket connection management and the
//! dashboard controller.

pub mod controller;
pub mod global;
pub mod websocket;

pub use controller::DashboardController;
pub use global::{provide_global_state, DisplayPrefs, GlobalState, RegisterReading, ToastKind};
pub use websocket::{WebSocketClient, WsHooks, WsMessage};
