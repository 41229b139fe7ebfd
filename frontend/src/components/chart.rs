//! Bar chart over one numeric column.
//!
//! Pure CSS bars sized against the series maximum; values at or below zero
//! render as zero-height bars.

use leptos::*;

use crate::types::ChartSeries;

#[component]
pub fn BarChart(series: ChartSeries) -> impl IntoView {
    if series.values.is_empty() {
        return view! {
            <div class="chart chart-empty">
                "No values to chart for " {series.column}
            </div>
        }
        .into_view();
    }

    let max = series
        .values
        .iter()
        .cloned()
        .fold(f64::MIN, f64::max)
        .max(f64::EPSILON);

    let bars = series
        .values
        .iter()
        .map(|value| {
            let height = (value / max * 100.0).clamp(0.0, 100.0);
            view! {
                <div
                    class="chart-bar"
                    style=format!("height: {:.1}%", height)
                    title=format!("{}", value)
                ></div>
            }
        })
        .collect_view();

    view! {
        <div class="chart">
            <div class="chart-title">{series.column}</div>
            <div class="chart-bars">{bars}</div>
        </div>
    }
    .into_view()
}
