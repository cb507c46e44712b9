//! Status Indicator Component
//!
//! Badge showing the simulator state: checking before the first poll lands,
//! then running or stopped. Exactly one state renders at a time.

use leptos::*;

use crate::state::global::{GlobalState, IndicatorState};

/// Simulator status badge
#[component]
pub fn StatusIndicator() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let indicator = create_memo(move |_| IndicatorState::from(state.sim_running.get()));

    view! {
        <span class=move || {
            format!(
                "inline-flex items-center space-x-2 px-3 py-1 rounded-full text-sm font-medium {}",
                indicator.get().badge_class()
            )
        }>
            <span class="w-2 h-2 bg-current rounded-full" />
            <span>{move || indicator.get().label()}</span>
        </span>
    }
}
