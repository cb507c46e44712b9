//! Monitor Page
//!
//! Live register table fed by the WebSocket feed, grouped by device.

use leptos::*;
use serde_json::json;

use crate::format::{format_timestamp, format_value};
use crate::state::controller::DashboardController;
use crate::state::global::GlobalState;

/// Monitor page component
#[component]
pub fn Monitor() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let controller =
        use_context::<DashboardController>().expect("DashboardController not found");

    let ctrl = controller.clone();
    create_effect(move |_| {
        ctrl.connect_websocket();
    });

    // Selection survives navigation through the persisted preferences
    let (selected_device, set_selected_device) =
        create_signal(state.prefs.get_untracked().selected_device);

    let state_for_select = state.clone();
    let on_select = move |ev| {
        let device = event_target_value(&ev);
        set_selected_device.set(Some(device.clone()));
        let mut prefs = state_for_select.prefs.get_untracked();
        prefs.selected_device = Some(device);
        state_for_select.save_prefs(prefs);
    };

    let state_for_devices = state.clone();
    let devices = create_memo(move |_| {
        let mut names: Vec<String> = state_for_devices.live_data.get().keys().cloned().collect();
        names.sort();
        names
    });

    // The shown device: the explicit selection, else the first live one
    let shown_device = create_memo(move |_| {
        selected_device
            .get()
            .or_else(|| devices.get().first().cloned())
    });

    let state_for_update = state.clone();
    let last_update = move || {
        state_for_update
            .last_update
            .get()
            .map(|ts| format!("Last update: {}", format_timestamp(&json!(ts))))
            .unwrap_or_else(|| "No data received yet".to_string())
    };

    let state_for_rows = state.clone();

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Monitor"</h1>
                    <p class="text-gray-400 mt-1">"Live register values"</p>
                </div>
                <div class="text-sm text-gray-400">{last_update}</div>
            </div>

            // Device selector
            <div class="flex items-center space-x-3">
                <label class="text-sm text-gray-400">"Device"</label>
                <select
                    on:change=on_select
                    class="bg-gray-700 rounded-lg px-4 py-2 border border-gray-600
                           focus:border-primary-500 focus:outline-none"
                >
                    {move || {
                        let shown = shown_device.get();
                        devices.get()
                            .into_iter()
                            .map(|name| {
                                let selected = Some(&name) == shown.as_ref();
                                view! {
                                    <option value=name.clone() selected=selected>{name.clone()}</option>
                                }
                            })
                            .collect_view()
                    }}
                </select>
            </div>

            // Register table
            <section class="bg-gray-800 rounded-xl overflow-hidden">
                <table class="w-full text-sm">
                    <thead class="bg-gray-700 text-gray-300">
                        <tr>
                            <th class="px-4 py-3 text-left">"Register"</th>
                            <th class="px-4 py-3 text-left">"Address"</th>
                            <th class="px-4 py-3 text-right">"Value"</th>
                            <th class="px-4 py-3 text-left">"Unit"</th>
                            <th class="px-4 py-3 text-left">"Type"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let decimals = state_for_rows.prefs.get().decimals;
                            let data = state_for_rows.live_data.get();
                            let readings = shown_device.get().and_then(|d| data.get(&d).cloned());

                            match readings {
                                Some(readings) => {
                                    let mut rows: Vec<_> = readings.into_values().collect();
                                    rows.sort_by_key(|r| r.address);

                                    rows.into_iter().map(|reading| {
                                        let value = format_value(&reading.value, &reading.data_type, decimals);
                                        view! {
                                            <tr class="border-t border-gray-700">
                                                <td class="px-4 py-3">
                                                    <div class="font-medium">{reading.name.clone()}</div>
                                                    <div class="text-gray-500 text-xs">{reading.description.clone()}</div>
                                                </td>
                                                <td class="px-4 py-3 text-gray-400">{reading.address}</td>
                                                <td class="px-4 py-3 text-right font-mono">{value}</td>
                                                <td class="px-4 py-3 text-gray-400">{reading.unit.clone()}</td>
                                                <td class="px-4 py-3 text-gray-500">{reading.data_type.clone()}</td>
                                            </tr>
                                        }
                                    }).collect_view()
                                }
                                None => view! {
                                    <tr>
                                        <td colspan="5" class="px-4 py-8 text-center text-gray-500">
                                            "No live data - start the simulator from the dashboard"
                                        </td>
                                    </tr>
                                }.into_view(),
                            }
                        }}
                    </tbody>
                </table>
            </section>
        </div>
    }
}
