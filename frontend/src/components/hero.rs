//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"📊 Sweeper"</h1>
            <p class="subtitle">
                "Upload CSV or Excel files, remove duplicates, fill missing values, "
                "pick your columns and download the result in either format."
            </p>
        </div>
    }
}
