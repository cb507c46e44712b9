//! Settings Page
//!
//! Display preferences, persisted in the browser's local storage.

use leptos::*;

use crate::state::global::{DisplayPrefs, GlobalState, PREFS_KEY};
use crate::storage;

/// Settings page component
#[component]
pub fn Settings() -> impl IntoView {
    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Settings"</h1>
                <p class="text-gray-400 mt-1">"Configure the dashboard display"</p>
            </div>

            <DisplaySettings />
            <ConnectionStatus />
        </div>
    }
}

/// Display preferences editor
#[component]
fn DisplaySettings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let initial = state.prefs.get_untracked();
    let (decimals, set_decimals) = create_signal(initial.decimals);
    let (window_secs, set_window_secs) = create_signal(initial.chart_window_secs);

    let state_for_save = state.clone();
    let save = move |_| {
        state_for_save.save_display_prefs(decimals.get(), window_secs.get());
        state_for_save.show_success("Preferences saved");
    };

    let state_for_reset = state.clone();
    let reset = move |_| {
        storage::remove_from_storage(PREFS_KEY);
        let defaults = DisplayPrefs::default();
        set_decimals.set(defaults.decimals);
        set_window_secs.set(defaults.chart_window_secs);
        state_for_reset.prefs.set(defaults);
        state_for_reset.show_success("Preferences reset to defaults");
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Display"</h2>

            <div class="space-y-4 max-w-md">
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"FLOAT32 decimal places"</label>
                    <input
                        type="number"
                        min="0"
                        max="6"
                        prop:value=move || decimals.get().to_string()
                        on:input=move |ev| {
                            if let Ok(value) = event_target_value(&ev).parse() {
                                set_decimals.set(value);
                            }
                        }
                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Chart window"</label>
                    <select
                        on:change=move |ev| {
                            if let Ok(value) = event_target_value(&ev).parse() {
                                set_window_secs.set(value);
                            }
                        }
                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    >
                        {[30_u32, 60, 120, 300].into_iter().map(|secs| {
                            view! {
                                <option
                                    value=secs.to_string()
                                    selected=move || window_secs.get() == secs
                                >
                                    {format!("{secs} seconds")}
                                </option>
                            }
                        }).collect_view()}
                    </select>
                </div>

                <div class="flex space-x-2 pt-2">
                    <button
                        on:click=save
                        class="px-4 py-3 bg-primary-600 hover:bg-primary-700
                               rounded-lg font-medium transition-colors"
                    >
                        "Save"
                    </button>
                    <button
                        on:click=reset
                        class="px-4 py-3 bg-gray-600 hover:bg-gray-500
                               rounded-lg font-medium transition-colors"
                    >
                        "Reset"
                    </button>
                </div>
            </div>
        </section>
    }
}

/// Live connection status readout
#[component]
fn ConnectionStatus() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Connection"</h2>

            <div class="flex items-center space-x-2">
                <span class="text-sm text-gray-400">"WebSocket:"</span>
                {
                    let ws_connected = state.ws_connected;
                    move || {
                        if ws_connected.get() {
                            view! { <span class="text-green-400">"🟢 Connected"</span> }.into_view()
                        } else {
                            view! { <span class="text-red-400">"🔴 Disconnected"</span> }.into_view()
                        }
                    }
                }
            </div>
        </section>
    }
}
