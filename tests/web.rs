//! Browser-side tests for the persistence helpers and feed URL derivation.
//!
//! Run with `wasm-pack test --headless --chrome` (or trunk's test runner);
//! these need a real `window` and localStorage.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use powermeter_ui::state::global::{provide_global_state, GlobalState, PREFS_KEY};
use powermeter_ui::state::websocket::{WebSocketClient, WsHooks};
use powermeter_ui::storage::{load_from_storage, remove_from_storage, save_to_storage};

#[wasm_bindgen_test]
fn load_returns_default_for_missing_key() {
    remove_from_storage("pm-test-missing");
    assert_eq!(load_from_storage("pm-test-missing", 42_i32), 42);
}

#[wasm_bindgen_test]
fn save_then_load_roundtrips() {
    save_to_storage("pm-test-blob", &vec![1_i32, 2, 3]);
    assert_eq!(
        load_from_storage("pm-test-blob", Vec::<i32>::new()),
        vec![1, 2, 3]
    );
    remove_from_storage("pm-test-blob");
}

#[wasm_bindgen_test]
fn corrupt_blob_degrades_to_default() {
    let storage = web_sys::window().unwrap().local_storage().unwrap().unwrap();
    storage.set_item("pm-test-corrupt", "{not json").unwrap();
    assert_eq!(load_from_storage("pm-test-corrupt", 7_i32), 7);
    remove_from_storage("pm-test-corrupt");
}

#[wasm_bindgen_test]
fn saving_display_prefs_keeps_device_selection() {
    use leptos::{SignalGetUntracked, SignalUpdate};

    remove_from_storage(PREFS_KEY);
    let runtime = leptos::create_runtime();
    provide_global_state();
    let state = leptos::use_context::<GlobalState>().expect("state provided");

    state
        .prefs
        .update(|prefs| prefs.selected_device = Some("device_1".to_string()));
    state.save_display_prefs(3, 120);

    let prefs = state.prefs.get_untracked();
    assert_eq!(prefs.decimals, 3);
    assert_eq!(prefs.chart_window_secs, 120);
    assert_eq!(prefs.selected_device.as_deref(), Some("device_1"));

    runtime.dispose();
    remove_from_storage(PREFS_KEY);
}

#[wasm_bindgen_test]
fn fresh_client_is_quiescent() {
    let client = WebSocketClient::new(WsHooks::default());
    assert!(!client.is_connected());
    // Disconnect with no socket and no pending reconnect must be a no-op
    client.disconnect();
    assert!(!client.is_connected());
}

#[wasm_bindgen_test]
fn feed_url_matches_page_scheme() {
    let url = WebSocketClient::endpoint_url().expect("window available");
    assert!(url.starts_with("ws://") || url.starts_with("wss://"));
    assert!(url.ends_with("/ws"));
}
