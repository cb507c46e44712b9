//! Dashboard Page
//!
//! Simulator control panel: status badge, start/stop buttons and the
//! realtime power chart.

use leptos::*;

use crate::components::{RealtimePowerChart, StatusIndicator};
use crate::state::controller::DashboardController;
use crate::state::global::GlobalState;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let controller =
        use_context::<DashboardController>().expect("DashboardController not found");

    // Refresh immediately and open the live feed when the page mounts
    let ctrl = controller.clone();
    create_effect(move |_| {
        ctrl.spawn_refresh();
        ctrl.connect_websocket();
    });

    let (starting, set_starting) = create_signal(false);
    let (stopping, set_stopping) = create_signal(false);

    let ctrl_start = controller.clone();
    let on_start = move |_| {
        set_starting.set(true);
        let ctrl = ctrl_start.clone();
        spawn_local(async move {
            // Failures are already surfaced as toasts by the controller
            let _ = ctrl.start_simulator().await;
            set_starting.set(false);
        });
    };

    let ctrl_stop = controller.clone();
    let on_stop = move |_| {
        set_stopping.set(true);
        let ctrl = ctrl_stop.clone();
        spawn_local(async move {
            let _ = ctrl.stop_simulator().await;
            set_stopping.set(false);
        });
    };

    view! {
        <div class="space-y-8">
            // Page header with status badge
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Dashboard"</h1>
                    <p class="text-gray-400 mt-1">"Control and monitor the power meter simulator"</p>
                </div>
                <StatusIndicator />
            </div>

            // Control panel
            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Simulator Control"</h2>
                <div class="flex items-center space-x-4">
                    <button
                        on:click=on_start
                        disabled=move || starting.get()
                        class="px-6 py-3 bg-green-600 hover:bg-green-700 disabled:bg-gray-600
                               rounded-lg font-medium transition-colors"
                    >
                        {move || if starting.get() { "Starting..." } else { "Start" }}
                    </button>
                    <button
                        on:click=on_stop
                        disabled=move || stopping.get()
                        class="px-6 py-3 bg-red-600 hover:bg-red-700 disabled:bg-gray-600
                               rounded-lg font-medium transition-colors"
                    >
                        {move || if stopping.get() { "Stopping..." } else { "Stop" }}
                    </button>

                    <div class="text-sm text-gray-400">
                        {move || {
                            let devices = state.live_data.get().len();
                            if devices == 0 {
                                "No live devices".to_string()
                            } else {
                                format!("{devices} live device(s)")
                            }
                        }}
                    </div>
                </div>
            </section>

            // Realtime chart
            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Live Measurements"</h2>
                <RealtimePowerChart />
            </section>
        </div>
    }
}
