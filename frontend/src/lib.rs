//! Sweeper - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for uploading tabular files, cleaning them and
//! downloading the converted result.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header                                                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent                                                 │
//! │  ├── Hero (title, description)                              │
//! │  ├── UploadSection (multi-file)                             │
//! │  ├── FileCard per uploaded file                             │
//! │  │   (preview, cleaning, columns, chart, convert)           │
//! │  └── LogsPanel (SSE)                                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Common types (FileResult, LogEntry, etc.)
//! - [`components`] - UI components (Upload, FileCard, Chart, etc.)
//! - [`services`] - Backend communication (preview, convert)

use leptos::*;
use leptos_router::*;
use wasm_bindgen::prelude::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod components;
pub mod config;
pub mod services;
pub mod types;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // API
    ChartSeries, ColumnInfo, FilePreview, FileResult, PreviewResponse,
    // Files
    LoadedFile,
    // Logs
    LogEntry, LogLevel,
};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// WASM entry point - called automatically by trunk.
#[wasm_bindgen(start)]
pub fn main() {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Sweeper - Starting Leptos App");

    // Mount the application
    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    // Global state for the application
    let (files, set_files) = create_signal(None::<Vec<LoadedFile>>);
    let (logs, set_logs) = create_signal(Vec::<LogEntry>::new());

    // Initialize SSE connection ONCE at app startup
    init_sse_logs(set_logs);

    view! {
        <Header/>

        <div class="container">
            <Hero/>

            <UploadSection set_files=set_files set_logs=set_logs/>

            // One card per uploaded file (errors render as error cards)
            <Show
                when=move || files.get().is_some()
                fallback=|| view! { }
            >
                <div class="file-list">
                    <For
                        each=move || files.get().unwrap_or_default().into_iter().enumerate()
                        key=|(i, loaded)| (*i, loaded.result.file_name.clone())
                        children=move |(_, loaded)| {
                            view! {
                                <FileCard
                                    file=loaded.file
                                    result=loaded.result
                                    set_logs=set_logs
                                />
                            }
                        }
                    />
                </div>
            </Show>

            // Processing logs (appear once something happened)
            <Show
                when=move || !logs.get().is_empty()
                fallback=|| view! { }
            >
                <LogsPanel logs=logs set_logs=set_logs/>
            </Show>
        </div>

        <Footer/>
    }
}
