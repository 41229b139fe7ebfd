//! File upload component.
//!
//! Handles multi-file selection, upload to the backend and per-file result
//! collection. Unsupported or malformed files come back as per-file errors
//! and never block the rest of the batch.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlInputElement};

use crate::services::preview_files;
use crate::types::{LoadedFile, LogEntry, LogLevel};
use crate::BACKEND_URL;

#[component]
pub fn UploadSection(
    set_files: WriteSignal<Option<Vec<LoadedFile>>>,
    set_logs: WriteSignal<Vec<LogEntry>>,
) -> impl IntoView {
    let (is_uploading, set_is_uploading) = create_signal(false);
    let (error, set_error) = create_signal(None::<String>);

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);

        let Some(file_list) = input.files() else {
            return;
        };
        let selected: Vec<web_sys::File> = (0..file_list.length())
            .filter_map(|i| file_list.get(i))
            .collect();
        if selected.is_empty() {
            return;
        }

        set_error.set(None);
        set_files.set(None);

        spawn_local(async move {
            set_is_uploading.set(true);

            add_log(
                set_logs,
                LogLevel::Info,
                &format!("📤 Uploading {} file(s)...", selected.len()),
            );

            match preview_files(&selected, false, false, BACKEND_URL).await {
                Ok(response) => {
                    let ready = response
                        .files
                        .iter()
                        .filter(|f| f.status == "ready")
                        .count();
                    let failed = response.files.len() - ready;

                    add_log(
                        set_logs,
                        if failed == 0 { LogLevel::Success } else { LogLevel::Warning },
                        &format!("✅ {} file(s) ready, {} failed", ready, failed),
                    );

                    // Pair each browser file with its outcome (upload order
                    // is preserved by the backend).
                    let loaded: Vec<LoadedFile> = selected
                        .iter()
                        .cloned()
                        .zip(response.files.into_iter())
                        .map(|(file, result)| LoadedFile { file, result })
                        .collect();

                    set_files.set(Some(loaded));
                }
                Err(e) => {
                    add_log(set_logs, LogLevel::Error, &format!("❌ Upload failed: {}", e));
                    set_error.set(Some(e));
                }
            }

            set_is_uploading.set(false);
        });
    };

    let trigger_file_input = move |_| {
        if let Some(window) = web_sys::window() {
            if let Some(document) = window.document() {
                if let Some(input) = document.get_element_by_id("fileInput") {
                    if let Some(html_input) = input.dyn_ref::<HtmlInputElement>() {
                        html_input.click();
                    }
                }
            }
        }
    };

    view! {
        <div
            class="upload-section"
            id="uploadZone"
            on:click=trigger_file_input
        >
            <div class="upload-icon">"📤"</div>
            <div class="upload-text">
                {move || if is_uploading.get() {
                    "⏳ Uploading and processing..."
                } else {
                    "Drop CSV or XLSX files here"
                }}
            </div>

            <Show
                when=move || !is_uploading.get()
                fallback=|| view! { }
            >
                <div class="upload-hint">"or click to select (multiple files allowed)"</div>
            </Show>

            <Show
                when=move || error.get().is_some()
                fallback=|| view! { }
            >
                <div class="error-message">
                    {move || error.get().unwrap_or_default()}
                </div>
            </Show>

            <input
                type="file"
                id="fileInput"
                accept=".csv,.xlsx"
                multiple=true
                style="display:none"
                on:change=on_file_change
            />

            <Show
                when=move || !is_uploading.get()
                fallback=|| view! { }
            >
                <label for="fileInput" class="upload-button">
                    "Choose files"
                </label>
            </Show>
        </div>
    }
}

/// Append a timestamped entry to the logs panel and the console.
pub fn add_log(set_logs: WriteSignal<Vec<LogEntry>>, level: LogLevel, message: &str) {
    let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();

    set_logs.update(|logs| {
        logs.push(LogEntry {
            level,
            message: message.to_string(),
            timestamp,
        });
    });

    log::info!("{}", message);
}
