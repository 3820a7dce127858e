//! No-Data Placeholder
//!
//! Shown in place of the chart when there are no expenses to plot.

use leptos::*;

#[component]
pub fn NoDataPlaceholder() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center h-96">
            <div class="text-center">
                <svg
                    class="w-16 h-16 text-gray-500 mx-auto mb-4"
                    fill="none"
                    stroke="currentColor"
                    viewBox="0 0 24 24"
                >
                    <path
                        stroke-linecap="round"
                        stroke-linejoin="round"
                        stroke-width="2"
                        d="M9 19v-6a2 2 0 00-2-2H5a2 2 0 00-2 2v6a2 2 0 002 2h2a2 2 0 002-2zm0 0V9a2 2 0 012-2h2a2 2 0 012 2v10m-6 0a2 2 0 002 2h2a2 2 0 002-2m0 0V5a2 2 0 012-2h2a2 2 0 012 2v14a2 2 0 01-2 2h-2a2 2 0 01-2-2z"
                    ></path>
                </svg>
                <p class="text-gray-400 text-lg">"No expense data available"</p>
                <p class="text-gray-500 text-sm mt-2">
                    "Add some expenses to see your spending breakdown"
                </p>
            </div>
        </div>
    }
}
