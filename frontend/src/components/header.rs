//! Top navigation bar.

use leptos::*;

use crate::APP_NAME;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <div class="header-brand">
                <span class="header-logo">"🧹"</span>
                <span class="header-title">{APP_NAME}</span>
            </div>
            <div class="header-tagline">"CSV ⇄ XLSX cleaning and conversion"</div>
        </header>
    }
}
