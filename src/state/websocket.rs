//! WebSocket Client
//!
//! Real-time connection to the simulator feed with bounded
//! exponential-backoff reconnection.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, MessageEvent, WebSocket};

use super::global::DeviceReadings;

/// Automatic reconnection stops after this many consecutive failures.
pub const MAX_RECONNECT_ATTEMPTS: u32 = 5;
/// Delay before the first reconnect attempt; doubles per attempt.
pub const BASE_RECONNECT_DELAY_MS: u32 = 1000;

/// Backoff delay for a 1-indexed attempt: 1s, 2s, 4s, 8s, 16s.
pub fn reconnect_delay_ms(attempt: u32) -> u32 {
    BASE_RECONNECT_DELAY_MS * 2_u32.pow(attempt.saturating_sub(1))
}

/// Whether another automatic attempt may be scheduled after `attempts_used`
/// failures. The counter only resets on a successful open.
pub fn should_retry(attempts_used: u32) -> bool {
    attempts_used < MAX_RECONNECT_ATTEMPTS
}

/// Messages pushed by the simulator feed.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsMessage {
    DataUpdate {
        data: HashMap<String, DeviceReadings>,
        timestamp: String,
    },
}

type Hook = Rc<dyn Fn()>;
type MessageHook = Rc<dyn Fn(serde_json::Value)>;

/// Lifecycle callbacks injected at construction.
///
/// Each slot defaults to a no-op, so callers only fill in what they need:
///
/// ```ignore
/// let hooks = WsHooks {
///     on_message: Rc::new(|payload| { /* ... */ }),
///     ..WsHooks::default()
/// };
/// ```
#[derive(Clone)]
pub struct WsHooks {
    pub on_open: Hook,
    pub on_message: MessageHook,
    pub on_close: Hook,
    pub on_error: Hook,
}

impl Default for WsHooks {
    fn default() -> Self {
        Self {
            on_open: Rc::new(|| {}),
            on_message: Rc::new(|_| {}),
            on_close: Rc::new(|| {}),
            on_error: Rc::new(|| {}),
        }
    }
}

struct Inner {
    ws: RefCell<Option<WebSocket>>,
    connected: Cell<bool>,
    reconnect_attempts: Cell<u32>,
    // Held so a manual disconnect can cancel a pending reconnect.
    reconnect_timer: RefCell<Option<Timeout>>,
    hooks: WsHooks,
}

/// WebSocket client for the `/ws` feed.
///
/// Holds at most one socket at a time; `connect` is idempotent while the
/// socket is open.
#[derive(Clone)]
pub struct WebSocketClient {
    inner: Rc<Inner>,
}

impl WebSocketClient {
    pub fn new(hooks: WsHooks) -> Self {
        Self {
            inner: Rc::new(Inner {
                ws: RefCell::new(None),
                connected: Cell::new(false),
                reconnect_attempts: Cell::new(0),
                reconnect_timer: RefCell::new(None),
                hooks,
            }),
        }
    }

    /// Feed URL derived from the page location: `wss` on https, `ws`
    /// otherwise, same host, path `/ws`.
    pub fn endpoint_url() -> Option<String> {
        let location = web_sys::window()?.location();
        let protocol = location.protocol().ok()?;
        let host = location.host().ok()?;
        let scheme = if protocol == "https:" { "wss" } else { "ws" };
        Some(format!("{scheme}://{host}/ws"))
    }

    pub fn is_connected(&self) -> bool {
        self.inner
            .ws
            .borrow()
            .as_ref()
            .map(|ws| ws.ready_state() == WebSocket::OPEN)
            .unwrap_or(false)
    }

    /// Connect to the feed. No-op while an open socket exists.
    pub fn connect(&self) {
        if self.is_connected() {
            return;
        }

        let Some(url) = Self::endpoint_url() else {
            return;
        };

        match WebSocket::new(&url) {
            Ok(ws) => {
                self.install_handlers(&ws);
                *self.inner.ws.borrow_mut() = Some(ws);
            }
            Err(e) => {
                web_sys::console::error_1(
                    &format!("WebSocket connection failed: {e:?}").into(),
                );
                self.schedule_reconnect();
            }
        }
    }

    fn install_handlers(&self, ws: &WebSocket) {
        // On open
        let inner = Rc::clone(&self.inner);
        let on_open = Closure::wrap(Box::new(move |_: JsValue| {
            web_sys::console::log_1(&"WebSocket connected".into());
            inner.connected.set(true);
            inner.reconnect_attempts.set(0);
            (inner.hooks.on_open)();
        }) as Box<dyn FnMut(JsValue)>);
        ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        on_open.forget();

        // On message: malformed payloads are logged and dropped, never
        // surfaced as a panic.
        let inner = Rc::clone(&self.inner);
        let on_message = Closure::wrap(Box::new(move |event: MessageEvent| {
            if let Ok(text) = event.data().dyn_into::<js_sys::JsString>() {
                let text: String = text.into();
                match serde_json::from_str::<serde_json::Value>(&text) {
                    Ok(payload) => (inner.hooks.on_message)(payload),
                    Err(e) => web_sys::console::warn_1(
                        &format!("Dropping malformed WebSocket payload: {e}").into(),
                    ),
                }
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        ws.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        on_message.forget();

        // On close: the close event also fires after an error, so this is
        // the single place reconnection is driven from.
        let client = self.clone();
        let on_close = Closure::wrap(Box::new(move |event: CloseEvent| {
            web_sys::console::log_1(
                &format!(
                    "WebSocket disconnected: code={}, reason={}",
                    event.code(),
                    event.reason()
                )
                .into(),
            );
            client.inner.connected.set(false);
            (client.inner.hooks.on_close)();
            client.schedule_reconnect();
        }) as Box<dyn FnMut(CloseEvent)>);
        ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));
        on_close.forget();

        // On error
        let inner = Rc::clone(&self.inner);
        let on_error = Closure::wrap(Box::new(move |e: JsValue| {
            web_sys::console::error_1(&format!("WebSocket error: {e:?}").into());
            (inner.hooks.on_error)();
        }) as Box<dyn FnMut(JsValue)>);
        ws.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_error.forget();
    }

    fn schedule_reconnect(&self) {
        let used = self.inner.reconnect_attempts.get();
        if !should_retry(used) {
            web_sys::console::log_1(&"Max reconnection attempts reached".into());
            return;
        }

        let attempt = used + 1;
        self.inner.reconnect_attempts.set(attempt);
        let delay = reconnect_delay_ms(attempt);

        web_sys::console::log_1(
            &format!("Attempting to reconnect in {delay}ms (attempt {attempt})").into(),
        );

        let client = self.clone();
        let timer = Timeout::new(delay, move || {
            client.inner.reconnect_timer.borrow_mut().take();
            client.connect();
        });
        *self.inner.reconnect_timer.borrow_mut() = Some(timer);
    }

    /// Close and discard the socket.
    ///
    /// Detaches the handlers first so the resulting close event does not
    /// schedule a reconnect, and cancels any reconnect already pending.
    pub fn disconnect(&self) {
        self.inner.reconnect_timer.borrow_mut().take();

        if let Some(ws) = self.inner.ws.borrow_mut().take() {
            ws.set_onopen(None);
            ws.set_onmessage(None);
            ws.set_onclose(None);
            ws.set_onerror(None);
            let _ = ws.close();
        }
        self.inner.connected.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_per_attempt() {
        assert_eq!(reconnect_delay_ms(1), 1000);
        assert_eq!(reconnect_delay_ms(2), 2000);
        assert_eq!(reconnect_delay_ms(3), 4000);
        assert_eq!(reconnect_delay_ms(4), 8000);
        assert_eq!(reconnect_delay_ms(5), 16000);
    }

    #[test]
    fn no_sixth_automatic_attempt() {
        for used in 0..MAX_RECONNECT_ATTEMPTS {
            assert!(should_retry(used));
        }
        assert!(!should_retry(MAX_RECONNECT_ATTEMPTS));
        assert!(!should_retry(MAX_RECONNECT_ATTEMPTS + 1));
    }

    #[test]
    fn data_update_message_decodes() {
        let raw = serde_json::json!({
            "type": "data_update",
            "data": {
                "device_1": {
                    "100": {
                        "name": "voltage_l1",
                        "address": 100,
                        "description": "Phase 1 voltage",
                        "value": 231.2,
                        "unit": "V",
                        "data_type": "FLOAT32"
                    }
                }
            },
            "timestamp": "2025-01-16T12:00:00+00:00"
        });

        let msg: WsMessage = serde_json::from_value(raw).expect("valid feed message");
        let WsMessage::DataUpdate { data, timestamp } = msg;
        assert_eq!(timestamp, "2025-01-16T12:00:00+00:00");
        let reading = &data["device_1"]["100"];
        assert_eq!(reading.name, "voltage_l1");
        assert_eq!(reading.unit, "V");
        assert_eq!(reading.data_type, "FLOAT32");
    }
}
