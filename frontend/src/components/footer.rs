//! Footer component

use leptos::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer>
            <div>"Sweeper • Powered by " <span class="rust-badge">"🦀 Rust + Leptos"</span></div>
            <div class="footer-links">
                <a
                    href="https://github.com/sweeper-tools/sweeper"
                    class="footer-link"
                    target="_blank"
                >
                    "GitHub"
                </a>
            </div>
        </footer>
    }
}
