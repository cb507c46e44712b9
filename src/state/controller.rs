//! Dashboard Controller
//!
//! Owns the connection state of the page: wires browser lifecycle events to
//! status refresh, runs the status poll, drives the WebSocket feed and issues
//! start/stop control requests.
//!
//! One controller is constructed per page and handed to components through
//! the Leptos context; nothing here is a process-wide global.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use leptos::{spawn_local, SignalSet};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::api::{self, ApiError, ControlResponse, StatusSnapshot};
use crate::state::global::{GlobalState, ToastKind, TOAST_DURATION_MS};
use crate::state::websocket::{WebSocketClient, WsHooks};

/// Fixed status-poll period.
pub const STATUS_POLL_INTERVAL_MS: u32 = 10_000;
/// Wait after a successful control action before re-polling, so the backend
/// has settled.
pub const CONTROL_REFRESH_DELAY_MS: u32 = 1_000;

/// How a control response is surfaced: the toast to show and whether the
/// single deferred status refresh gets scheduled.
fn control_followup(response: &ControlResponse) -> (ToastKind, bool) {
    if response.is_success() {
        (ToastKind::Success, true)
    } else {
        (ToastKind::Error, false)
    }
}

#[derive(Clone)]
pub struct DashboardController {
    state: GlobalState,
    ws: WebSocketClient,
    // Timer handles are retained so `shutdown` can cancel them; dropping a
    // handle cancels the timer.
    poll: Rc<RefCell<Option<Interval>>>,
    refresh_timer: Rc<RefCell<Option<Timeout>>>,
}

impl DashboardController {
    pub fn new(state: GlobalState, hooks: WsHooks) -> Self {
        Self {
            state,
            ws: WebSocketClient::new(hooks),
            poll: Rc::new(RefCell::new(None)),
            refresh_timer: Rc::new(RefCell::new(None)),
        }
    }

    /// Bind browser lifecycle listeners and start the status poll.
    ///
    /// Listeners live for the rest of the page; the poll handle is retained
    /// and can be torn down with [`shutdown`](Self::shutdown).
    pub fn init(&self) {
        self.bind_browser_events();
        self.spawn_refresh();

        let ctrl = self.clone();
        let interval = Interval::new(STATUS_POLL_INTERVAL_MS, move || ctrl.spawn_refresh());
        *self.poll.borrow_mut() = Some(interval);
    }

    fn bind_browser_events(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Refresh when the page becomes visible again
        let ctrl = self.clone();
        let on_visibility = Closure::wrap(Box::new(move |_: web_sys::Event| {
            let visible = web_sys::window()
                .and_then(|w| w.document())
                .map(|d| d.visibility_state() == web_sys::VisibilityState::Visible)
                .unwrap_or(false);
            if visible {
                ctrl.spawn_refresh();
            }
        }) as Box<dyn FnMut(web_sys::Event)>);
        let _ = document.add_event_listener_with_callback(
            "visibilitychange",
            on_visibility.as_ref().unchecked_ref(),
        );
        on_visibility.forget();

        // Refresh when the browser regains connectivity
        let ctrl = self.clone();
        let on_online = Closure::wrap(Box::new(move |_: web_sys::Event| {
            ctrl.spawn_refresh();
        }) as Box<dyn FnMut(web_sys::Event)>);
        let _ =
            window.add_event_listener_with_callback("online", on_online.as_ref().unchecked_ref());
        on_online.forget();

        // Degrade the indicator immediately when connectivity is lost
        let sim_running = self.state.sim_running;
        let on_offline = Closure::wrap(Box::new(move |_: web_sys::Event| {
            sim_running.set(Some(false));
        }) as Box<dyn FnMut(web_sys::Event)>);
        let _ = window
            .add_event_listener_with_callback("offline", on_offline.as_ref().unchecked_ref());
        on_offline.forget();
    }

    /// Fire-and-forget status refresh.
    pub fn spawn_refresh(&self) {
        let ctrl = self.clone();
        spawn_local(async move {
            ctrl.refresh_status().await;
        });
    }

    /// Fetch `/api/status` and repaint the indicator.
    ///
    /// Any failure is logged and degrades the indicator to "stopped"; it is
    /// never propagated to the caller.
    pub async fn refresh_status(&self) -> Option<StatusSnapshot> {
        match api::fetch_status().await {
            Ok(snapshot) => {
                self.state.sim_running.set(Some(snapshot.is_running));
                Some(snapshot)
            }
            Err(e) => {
                web_sys::console::error_1(&format!("Error fetching status: {e}").into());
                self.state.sim_running.set(Some(false));
                None
            }
        }
    }

    pub fn connect_websocket(&self) {
        self.ws.connect();
    }

    pub fn disconnect_websocket(&self) {
        self.ws.disconnect();
    }

    /// Start the simulator and surface the outcome as a toast.
    pub async fn start_simulator(&self) -> Result<ControlResponse, ApiError> {
        self.run_control(api::start_simulator()).await
    }

    /// Stop the simulator and surface the outcome as a toast.
    pub async fn stop_simulator(&self) -> Result<ControlResponse, ApiError> {
        self.run_control(api::stop_simulator()).await
    }

    async fn run_control(
        &self,
        request: impl std::future::Future<Output = Result<ControlResponse, ApiError>>,
    ) -> Result<ControlResponse, ApiError> {
        match request.await {
            Ok(response) => {
                let (kind, schedule_refresh) = control_followup(&response);
                self.state
                    .show_notification(&response.message, kind, TOAST_DURATION_MS);
                if schedule_refresh {
                    // One deferred refresh, after the backend has settled.
                    let ctrl = self.clone();
                    let timer = Timeout::new(CONTROL_REFRESH_DELAY_MS, move || {
                        ctrl.refresh_timer.borrow_mut().take();
                        ctrl.spawn_refresh();
                    });
                    *self.refresh_timer.borrow_mut() = Some(timer);
                }
                Ok(response)
            }
            Err(e) => {
                self.state.show_error(&format!("Connection error: {e}"));
                Err(e)
            }
        }
    }

    /// Stop the poll, cancel any pending deferred refresh and close the feed.
    pub fn shutdown(&self) {
        self.poll.borrow_mut().take();
        self.refresh_timer.borrow_mut().take();
        self.ws.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_response_toasts_and_schedules_one_refresh() {
        let response = ControlResponse {
            status: "success".to_string(),
            message: "Simulator started".to_string(),
        };
        assert_eq!(control_followup(&response), (ToastKind::Success, true));
    }

    #[test]
    fn rejected_response_toasts_without_refresh() {
        for status in ["error", "Success", "ok", ""] {
            let response = ControlResponse {
                status: status.to_string(),
                message: "already running".to_string(),
            };
            assert_eq!(
                control_followup(&response),
                (ToastKind::Error, false),
                "status {status:?} must not schedule a refresh"
            );
        }
    }
}
