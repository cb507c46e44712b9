//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;
use std::collections::HashMap;

use crate::storage;

/// Default toast display time.
pub const TOAST_DURATION_MS: u32 = 5000;

/// Storage key for the display preferences blob.
pub const PREFS_KEY: &str = "powermeter_display_prefs";

/// Severity of a toast notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    /// Parse a kind name; anything unrecognized falls back to `Info`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "success" => ToastKind::Success,
            "error" => ToastKind::Error,
            "warning" => ToastKind::Warning,
            _ => ToastKind::Info,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ToastKind::Success => "✓",
            ToastKind::Error => "✕",
            ToastKind::Warning => "⚠",
            ToastKind::Info => "ℹ",
        }
    }

    pub fn bg_class(self) -> &'static str {
        match self {
            ToastKind::Success => "bg-green-600",
            ToastKind::Error => "bg-red-600",
            ToastKind::Warning => "bg-yellow-600",
            ToastKind::Info => "bg-blue-600",
        }
    }
}

/// A queued transient notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastItem {
    pub id: u32,
    pub message: String,
    pub kind: ToastKind,
}

/// Visual state of the simulator status indicator.
///
/// Derived from the last status poll: `None` before the first result,
/// `Some(bool)` afterwards. The three variants are mutually exclusive by
/// construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndicatorState {
    Checking,
    Running,
    Stopped,
}

impl From<Option<bool>> for IndicatorState {
    fn from(is_running: Option<bool>) -> Self {
        match is_running {
            None => IndicatorState::Checking,
            Some(true) => IndicatorState::Running,
            Some(false) => IndicatorState::Stopped,
        }
    }
}

impl IndicatorState {
    pub fn label(self) -> &'static str {
        match self {
            IndicatorState::Checking => "Checking...",
            IndicatorState::Running => "Connected",
            IndicatorState::Stopped => "Disconnected",
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            IndicatorState::Checking => "bg-yellow-600 text-white",
            IndicatorState::Running => "bg-green-600 text-white",
            IndicatorState::Stopped => "bg-gray-600 text-gray-200",
        }
    }
}

/// One register reading from the live feed.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct RegisterReading {
    pub name: String,
    pub address: u16,
    #[serde(default)]
    pub description: String,
    pub value: serde_json::Value,
    #[serde(default)]
    pub unit: String,
    pub data_type: String,
}

/// Readings of one device, keyed by register address.
pub type DeviceReadings = HashMap<String, RegisterReading>;

/// Display preferences, persisted in local storage.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DisplayPrefs {
    /// Decimal places for FLOAT32 register values.
    pub decimals: usize,
    /// Visible realtime chart window in seconds.
    pub chart_window_secs: u32,
    /// Device last chosen on the monitor page.
    #[serde(default)]
    pub selected_device: Option<String>,
}

impl Default for DisplayPrefs {
    fn default() -> Self {
        Self {
            decimals: crate::format::DEFAULT_DECIMALS,
            chart_window_secs: 60,
            selected_device: None,
        }
    }
}

/// Global application state provided to all components.
#[derive(Clone)]
pub struct GlobalState {
    /// Simulator running flag; `None` until the first status poll lands.
    pub sim_running: RwSignal<Option<bool>>,
    /// WebSocket connection status.
    pub ws_connected: RwSignal<bool>,
    /// Latest readings per device from the live feed.
    pub live_data: RwSignal<HashMap<String, DeviceReadings>>,
    /// Timestamp (epoch millis) of the last feed update.
    pub last_update: RwSignal<Option<i64>>,
    /// Active toast notifications.
    pub toasts: RwSignal<Vec<ToastItem>>,
    /// Display preferences, mirrored to local storage.
    pub prefs: RwSignal<DisplayPrefs>,
    toast_seq: RwSignal<u32>,
}

/// Provide global state to the component tree.
pub fn provide_global_state() {
    let state = GlobalState {
        sim_running: create_rw_signal(None),
        ws_connected: create_rw_signal(false),
        live_data: create_rw_signal(HashMap::new()),
        last_update: create_rw_signal(None),
        toasts: create_rw_signal(Vec::new()),
        prefs: create_rw_signal(storage::load_from_storage(PREFS_KEY, DisplayPrefs::default())),
        toast_seq: create_rw_signal(0),
    };

    provide_context(state);
}

impl GlobalState {
    /// Show a transient notification; it removes itself after `duration_ms`.
    pub fn show_notification(&self, message: &str, kind: ToastKind, duration_ms: u32) {
        let id = self.toast_seq.get_untracked() + 1;
        self.toast_seq.set(id);

        self.toasts.update(|toasts| {
            toasts.push(ToastItem {
                id,
                message: message.to_string(),
                kind,
            })
        });

        let toasts = self.toasts;
        gloo_timers::callback::Timeout::new(duration_ms, move || {
            toasts.update(|toasts| toasts.retain(|t| t.id != id));
        })
        .forget();
    }

    pub fn show_success(&self, message: &str) {
        self.show_notification(message, ToastKind::Success, TOAST_DURATION_MS);
    }

    pub fn show_error(&self, message: &str) {
        self.show_notification(message, ToastKind::Error, TOAST_DURATION_MS);
    }

    /// Replace the live readings with a fresh feed update.
    pub fn apply_update(&self, data: HashMap<String, DeviceReadings>, timestamp_ms: i64) {
        self.live_data.set(data);
        self.last_update.set(Some(timestamp_ms));
    }

    /// Persist the current preferences and update the signal.
    pub fn save_prefs(&self, prefs: DisplayPrefs) {
        storage::save_to_storage(PREFS_KEY, &prefs);
        self.prefs.set(prefs);
    }

    /// Update the display fields, keeping the persisted device selection.
    pub fn save_display_prefs(&self, decimals: usize, chart_window_secs: u32) {
        let mut prefs = self.prefs.get_untracked();
        prefs.decimals = decimals;
        prefs.chart_window_secs = chart_window_secs;
        self.save_prefs(prefs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_is_total_over_poll_results() {
        assert_eq!(IndicatorState::from(None), IndicatorState::Checking);
        assert_eq!(IndicatorState::from(Some(true)), IndicatorState::Running);
        assert_eq!(IndicatorState::from(Some(false)), IndicatorState::Stopped);
    }

    #[test]
    fn indicator_labels_are_distinct() {
        let labels = [
            IndicatorState::Checking.label(),
            IndicatorState::Running.label(),
            IndicatorState::Stopped.label(),
        ];
        assert_eq!(
            labels.iter().collect::<std::collections::HashSet<_>>().len(),
            3
        );
    }

    #[test]
    fn unknown_toast_kind_falls_back_to_info() {
        assert_eq!(ToastKind::from_name("success"), ToastKind::Success);
        assert_eq!(ToastKind::from_name("error"), ToastKind::Error);
        assert_eq!(ToastKind::from_name("warning"), ToastKind::Warning);
        assert_eq!(ToastKind::from_name("info"), ToastKind::Info);
        assert_eq!(ToastKind::from_name("verbose"), ToastKind::Info);
        assert_eq!(ToastKind::from_name(""), ToastKind::Info);
    }

    #[test]
    fn default_prefs() {
        let prefs = DisplayPrefs::default();
        assert_eq!(prefs.decimals, 2);
        assert_eq!(prefs.chart_window_secs, 60);
        assert!(prefs.selected_device.is_none());
    }
}
