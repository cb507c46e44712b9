//! App Root Component
//!
//! Routing, global state, and the dashboard controller that owns the
//! connection lifecycle for the page.

use leptos::*;
use leptos_router::*;
use std::rc::Rc;

use crate::components::{Nav, StatusIndicator, Toast};
use crate::format::parse_timestamp_ms;
use crate::pages::{Dashboard, Monitor, Settings};
use crate::state::controller::DashboardController;
use crate::state::global::{provide_global_state, GlobalState};
use crate::state::websocket::{WsHooks, WsMessage};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_global_state();
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // The controller is an explicit instance handed down through context;
    // feed callbacks are injected here rather than overridden per page.
    let controller = DashboardController::new(state.clone(), feed_hooks(state.clone()));
    controller.init();
    provide_context(controller);

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                <Nav />

                <main class="flex-1 container mx-auto px-4 py-8 pb-24">
                    <Routes>
                        <Route path="/" view=Dashboard />
                        <Route path="/monitor" view=Monitor />
                        <Route path="/settings" view=Settings />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <Footer />

                <Toast />
            </div>
        </Router>
    }
}

/// Feed lifecycle hooks: mirror connection state into signals and fold data
/// updates into the live readings.
fn feed_hooks(state: GlobalState) -> WsHooks {
    let open_state = state.clone();
    let close_state = state.clone();
    let message_state = state;

    WsHooks {
        on_open: Rc::new(move || open_state.ws_connected.set(true)),
        on_close: Rc::new(move || close_state.ws_connected.set(false)),
        on_message: Rc::new(move |payload| {
            match serde_json::from_value::<WsMessage>(payload) {
                Ok(WsMessage::DataUpdate { data, timestamp }) => {
                    let stamp = parse_timestamp_ms(&timestamp)
                        .unwrap_or_else(|| chrono::Utc::now().timestamp_millis());
                    message_state.apply_update(data, stamp);
                }
                Err(e) => {
                    web_sys::console::warn_1(
                        &format!("Ignoring unrecognized feed message: {e}").into(),
                    );
                }
            }
        }),
        ..WsHooks::default()
    }
}

/// Footer component showing connection status
#[component]
fn Footer() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm">
                // Simulator status badge
                <StatusIndicator />

                // WebSocket feed status
                <div class="flex items-center space-x-2">
                    {
                        let ws_connected = state.ws_connected;
                        move || {
                            if ws_connected.get() {
                                view! {
                                    <span class="flex items-center space-x-1 text-green-400">
                                        <span class="w-2 h-2 bg-green-400 rounded-full pulse" />
                                        <span>"Live feed"</span>
                                    </span>
                                }.into_view()
                            } else {
                                view! {
                                    <span class="flex items-center space-x-1 text-gray-500">
                                        <span class="w-2 h-2 bg-gray-500 rounded-full" />
                                        <span>"Feed offline"</span>
                                    </span>
                                }.into_view()
                            }
                        }
                    }
                </div>

                // Last feed update
                <div class="text-gray-400">
                    {move || {
                        state.last_update.get()
                            .and_then(chrono::DateTime::from_timestamp_millis)
                            .map(|dt| {
                                format!(
                                    "Last update: {}",
                                    dt.with_timezone(&chrono::Local).format("%H:%M:%S")
                                )
                            })
                            .unwrap_or_else(|| "No updates".to_string())
                    }}
                </div>
            </div>
        </footer>
    }
}

/// 404 page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔌"</div>
            <h1 class="text-3xl font-bold mb-2">"Nothing here"</h1>
            <p class="text-gray-400 mb-6">"No page at this address."</p>
            <A
                href="/"
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium
                       transition-colors"
            >
                "Back to the dashboard"
            </A>
        </div>
    }
}
