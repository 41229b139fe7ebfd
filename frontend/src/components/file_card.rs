//! Per-file card: details, preview table, cleaning actions, column
//! selection, chart and conversion controls.
//!
//! The backend keeps no state between interactions, so every cleaning
//! trigger re-uploads this card's file and re-runs the pipeline; the card
//! then swaps in the fresh preview.

use leptos::*;

use crate::components::{add_log, BarChart};
use crate::services::{convert_file, preview_files, ConvertRequest};
use crate::types::{FilePreview, FileResult, LogEntry, LogLevel};
use crate::BACKEND_URL;

#[component]
pub fn FileCard(
    file: web_sys::File,
    result: FileResult,
    set_logs: WriteSignal<Vec<LogEntry>>,
) -> impl IntoView {
    match result.preview {
        Some(preview) => view! {
            <FileDetail
                file=file
                file_name=result.file_name
                preview=preview
                set_logs=set_logs
            />
        }
        .into_view(),
        None => {
            let message = result
                .error
                .unwrap_or_else(|| "Unknown error".to_string());
            view! {
                <div class="file-card file-card-error">
                    <div class="file-card-header">
                        <span class="file-name">"❌ " {result.file_name}</span>
                    </div>
                    <div class="error-message">{message}</div>
                </div>
            }
            .into_view()
        }
    }
}

/// Re-run the pipeline for one file and swap in the fresh preview.
async fn refresh_preview(
    file: web_sys::File,
    remove_duplicates: bool,
    fill_missing: bool,
    set_preview: WriteSignal<FilePreview>,
    set_logs: WriteSignal<Vec<LogEntry>>,
) {
    match preview_files(&[file], remove_duplicates, fill_missing, BACKEND_URL).await {
        Ok(mut response) if !response.files.is_empty() => {
            let outcome = response.files.remove(0);
            match outcome.preview {
                Some(preview) => {
                    add_log(
                        set_logs,
                        LogLevel::Success,
                        &format!("🧹 {}: now {} rows", outcome.file_name, preview.row_count),
                    );
                    set_preview.set(preview);
                }
                None => add_log(
                    set_logs,
                    LogLevel::Error,
                    &format!(
                        "❌ {}: {}",
                        outcome.file_name,
                        outcome.error.unwrap_or_default()
                    ),
                ),
            }
        }
        Ok(_) => add_log(set_logs, LogLevel::Error, "❌ Empty response from backend"),
        Err(e) => add_log(set_logs, LogLevel::Error, &format!("❌ Cleaning failed: {}", e)),
    }
}

#[component]
fn FileDetail(
    file: web_sys::File,
    file_name: String,
    preview: FilePreview,
    set_logs: WriteSignal<Vec<LogEntry>>,
) -> impl IntoView {
    let column_order: Vec<String> = preview.columns.iter().map(|c| c.name.clone()).collect();
    let first_numeric = preview.charts.first().map(|s| s.column.clone());
    let size_kb = preview.size_bytes as f64 / 1024.0;

    let (preview, set_preview) = create_signal(preview);
    let (clean_enabled, set_clean_enabled) = create_signal(false);
    let (dedupe_applied, set_dedupe_applied) = create_signal(false);
    let (fill_applied, set_fill_applied) = create_signal(false);
    let (selected, set_selected) = create_signal(column_order.clone());
    let (chart_column, set_chart_column) = create_signal(first_numeric);
    let (format, set_format) = create_signal("csv".to_string());
    let (is_working, set_is_working) = create_signal(false);

    // Duplicate-removal trigger: re-runs the pipeline with the flag set.
    let file_for_dedupe = file.clone();
    let on_dedupe = move |_| {
        let file = file_for_dedupe.clone();
        set_dedupe_applied.set(true);
        let fill = fill_applied.get_untracked();
        set_is_working.set(true);
        spawn_local(async move {
            refresh_preview(file, true, fill, set_preview, set_logs).await;
            set_is_working.set(false);
        });
    };

    // Missing-value fill trigger.
    let file_for_fill = file.clone();
    let on_fill = move |_| {
        let file = file_for_fill.clone();
        set_fill_applied.set(true);
        let dedupe = dedupe_applied.get_untracked();
        set_is_working.set(true);
        spawn_local(async move {
            refresh_preview(file, dedupe, true, set_preview, set_logs).await;
            set_is_working.set(false);
        });
    };

    // Column toggle keeps the table's original column order.
    let order_for_toggle = column_order.clone();
    let toggle_column = move |name: String| {
        let order = order_for_toggle.clone();
        set_selected.update(move |sel| {
            if let Some(pos) = sel.iter().position(|n| n == &name) {
                sel.remove(pos);
            } else {
                sel.push(name);
                sel.sort_by_key(|n| {
                    order.iter().position(|o| o == n).unwrap_or(usize::MAX)
                });
            }
        });
    };

    let file_for_convert = file.clone();
    let name_for_convert = file_name.clone();
    let on_convert = move |_| {
        let file = file_for_convert.clone();
        let file_name = name_for_convert.clone();
        let options = ConvertRequest {
            remove_duplicates: dedupe_applied.get_untracked(),
            fill_missing: fill_applied.get_untracked(),
            columns: selected.get_untracked(),
            format: format.get_untracked(),
        };
        set_is_working.set(true);
        spawn_local(async move {
            add_log(
                set_logs,
                LogLevel::Info,
                &format!("📥 Converting {} to {}...", file_name, options.format),
            );
            match convert_file(&file, &options, BACKEND_URL).await {
                Ok(name) => add_log(
                    set_logs,
                    LogLevel::Success,
                    &format!("📩 Download ready: {}", name),
                ),
                Err(e) => add_log(
                    set_logs,
                    LogLevel::Error,
                    &format!("❌ {}: {}", file_name, e),
                ),
            }
            set_is_working.set(false);
        });
    };

    let radio_group = format!("format_{}", file_name);
    let radio_group_xlsx = radio_group.clone();

    view! {
        <div class="file-card">
            <div class="file-card-header">
                <span class="file-name">"📄 " {file_name.clone()}</span>
                <span class="file-meta">
                    {format!("{:.2} KB", size_kb)}
                    " • "
                    {move || format!(
                        "{} rows x {} columns",
                        preview.get().row_count,
                        preview.get().column_count
                    )}
                </span>
            </div>

            // Preview of the first rows, like the original head view
            <div class="preview-block">
                <h3>"🔍 Preview"</h3>
                <table class="preview-table">
                    <thead>
                        <tr>
                            {move || preview.get().columns.iter().map(|c| view! {
                                <th>{c.name.clone()}</th>
                            }).collect_view()}
                        </tr>
                    </thead>
                    <tbody>
                        {move || preview.get().head.iter().map(|row| view! {
                            <tr>
                                {row.iter().map(|cell| view! {
                                    <td class:missing=cell.is_none()>
                                        {cell.clone().unwrap_or_default()}
                                    </td>
                                }).collect_view()}
                            </tr>
                        }).collect_view()}
                    </tbody>
                </table>
            </div>

            // Cleaning options
            <div class="clean-block">
                <h3>"🧹 Data Cleaning Options"</h3>
                <label class="clean-toggle">
                    <input
                        type="checkbox"
                        prop:checked=move || clean_enabled.get()
                        on:change=move |_| set_clean_enabled.update(|v| *v = !*v)
                    />
                    " Clean data for this file"
                </label>
                <div
                    class="clean-actions"
                    style:display=move || if clean_enabled.get() { "flex" } else { "none" }
                >
                    <button
                        class="btn btn-secondary"
                        disabled=move || is_working.get() || dedupe_applied.get()
                        on:click=on_dedupe
                    >
                        {move || if dedupe_applied.get() {
                            "✅ Duplicates removed"
                        } else {
                            "🗑 Remove duplicates"
                        }}
                    </button>
                    <button
                        class="btn btn-secondary"
                        disabled=move || is_working.get() || fill_applied.get()
                        on:click=on_fill
                    >
                        {move || if fill_applied.get() {
                            "✅ Missing values filled"
                        } else {
                            "📊 Fill missing values"
                        }}
                    </button>
                </div>
            </div>

            // Column selection (all columns kept by default)
            <div class="columns-block">
                <h3>"📌 Select Columns to Keep"</h3>
                <div class="column-options">
                    <For
                        each=move || preview.get().columns
                        key=|c| c.name.clone()
                        children=move |col| {
                            let name = col.name.clone();
                            let name_for_checked = name.clone();
                            let toggle = toggle_column.clone();
                            view! {
                                <label class="column-option">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || {
                                            selected.get().contains(&name_for_checked)
                                        }
                                        on:change=move |_| toggle(name.clone())
                                    />
                                    <span>
                                        {col.name.clone()}
                                        {if col.numeric { " 🔢" } else { "" }}
                                    </span>
                                </label>
                            }
                        }
                    />
                </div>
            </div>

            // Bar chart over one numeric column
            <div class="chart-block">
                <h3>"📊 Data Visualization"</h3>
                {move || {
                    let p = preview.get();
                    if p.charts.is_empty() {
                        view! {
                            <div class="warning-message">
                                "⚠ No numeric columns available for visualization."
                            </div>
                        }
                        .into_view()
                    } else {
                        let chosen = chart_column.get();
                        let series = p
                            .charts
                            .iter()
                            .find(|s| chosen.as_deref() == Some(s.column.as_str()))
                            .or_else(|| p.charts.first())
                            .cloned();
                        view! {
                            <select
                                class="chart-select"
                                on:change=move |ev| {
                                    set_chart_column.set(Some(event_target_value(&ev)))
                                }
                            >
                                {p.charts.iter().map(|s| {
                                    let value = s.column.clone();
                                    let is_chosen = series
                                        .as_ref()
                                        .map(|sel| sel.column == value)
                                        .unwrap_or(false);
                                    view! {
                                        <option value=value selected=is_chosen>
                                            {s.column.clone()}
                                        </option>
                                    }
                                }).collect_view()}
                            </select>
                            {series.map(|s| view! { <BarChart series=s/> })}
                        }
                        .into_view()
                    }
                }}
            </div>

            // Conversion options
            <div class="convert-block">
                <h3>"🔄 Conversion Options"</h3>
                <div class="format-options">
                    <label>
                        <input
                            type="radio"
                            name=radio_group
                            value="csv"
                            prop:checked=move || format.get() == "csv"
                            on:change=move |_| set_format.set("csv".to_string())
                        />
                        " CSV"
                    </label>
                    <label>
                        <input
                            type="radio"
                            name=radio_group_xlsx
                            value="xlsx"
                            prop:checked=move || format.get() == "xlsx"
                            on:change=move |_| set_format.set("xlsx".to_string())
                        />
                        " Excel"
                    </label>
                </div>
                <button
                    class="btn btn-primary"
                    disabled=move || is_working.get() || selected.get().is_empty()
                    on:click=on_convert
                >
                    {move || if is_working.get() {
                        "⏳ Working...".to_string()
                    } else {
                        format!("📥 Convert & Download {}", file_name)
                    }}
                </button>
            </div>
        </div>
    }
}
