//! Header navigation bar.

use leptos::*;
use leptos_router::*;

const LINKS: [(&str, &str); 3] = [
    ("/", "Dashboard"),
    ("/monitor", "Monitor"),
    ("/settings", "Settings"),
];

#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4 h-16 flex items-center justify-between">
                <A href="/" class="flex items-center space-x-3">
                    <span class="text-2xl">"⚡"</span>
                    <span class="text-xl font-bold text-white">"Virtual Power Meter"</span>
                </A>

                <div class="flex items-center space-x-1">
                    {LINKS
                        .into_iter()
                        .map(|(href, label)| {
                            view! {
                                <A
                                    href=href
                                    class="px-4 py-2 rounded-lg text-gray-300 hover:text-white \
                                           hover:bg-gray-700 transition-colors"
                                    active_class="bg-gray-700 text-white"
                                    exact=true
                                >
                                    {label}
                                </A>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </nav>
    }
}
