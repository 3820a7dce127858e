//! Error Banner Component
//!
//! Persistent failure notice with a retry control that reloads the page.

use leptos::*;

/// Classes of the element the banner is rendered into
pub const BANNER_CLASS: &str = "bg-red-600 text-white p-4 rounded-lg mb-6";

/// Banner body
#[component]
pub fn ErrorBanner(
    #[prop(into)]
    message: String,
) -> impl IntoView {
    let on_retry = move |_| {
        if let Err(e) = window().location().reload() {
            tracing::error!("Page reload failed: {:?}", e);
        }
    };

    view! {
        <div class="flex items-center">
            <svg class="w-5 h-5 mr-2" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                <path
                    stroke-linecap="round"
                    stroke-linejoin="round"
                    stroke-width="2"
                    d="M12 8v4m0 4h.01M21 12a9 9 0 11-18 0 9 9 0 0118 0z"
                ></path>
            </svg>
            <span>{message}</span>
            <button
                on:click=on_retry
                class="ml-4 px-3 py-1 bg-red-700 rounded text-sm hover:bg-red-800"
            >
                "Retry"
            </button>
        </div>
    }
}
