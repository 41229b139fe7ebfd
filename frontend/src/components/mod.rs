//! UI Components for the Sweeper application.
//!
//! This module contains all Leptos components organized by function:
//!
//! # Layout Components
//! - [`Header`] - Top navigation bar
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploadSection`] - CSV/XLSX file upload
//! - [`FileCard`] - Per-file preview, cleaning, column selection, conversion
//! - [`BarChart`] - Bar chart over one numeric column
//! - [`LogsPanel`] - Real-time processing logs (SSE)

mod chart;
mod file_card;
mod footer;
mod header;
mod hero;
mod logs;
mod upload;

pub use chart::*;
pub use file_card::*;
pub use footer::*;
pub use header::*;
pub use hero::*;
pub use logs::*;
pub use upload::*;
