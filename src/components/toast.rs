//! Toast Notification Component
//!
//! Transient, self-dismissing notifications; the queue lives in
//! [`GlobalState`] and entries remove themselves after their display time.

use leptos::*;

use crate::state::global::{GlobalState, ToastItem};

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="fixed top-4 right-4 z-50 space-y-2">
            {move || {
                state.toasts.get()
                    .into_iter()
                    .map(|toast| view! { <ToastMessage toast /> })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
fn ToastMessage(toast: ToastItem) -> impl IntoView {
    view! {
        <div class=format!(
            "{} flex items-center gap-3 text-white px-4 py-3 rounded-lg shadow-lg \
             animate-slide-in",
            toast.kind.bg_class()
        )>
            <span class="text-lg">{toast.kind.icon()}</span>
            <span class="text-sm font-medium">{toast.message}</span>
        </div>
    }
}
