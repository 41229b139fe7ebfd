//! Application configuration.
//!
//! Centralized configuration for the Sweeper frontend.
//! In development, these are hardcoded. In production, they could be
//! loaded from environment or a config file.

/// Backend API base URL.
///
/// The sweeper backend server for preview and conversion.
pub const BACKEND_URL: &str = "http://localhost:3000";

/// Application name shown in the header.
pub const APP_NAME: &str = "Sweeper";

/// Maximum file size for upload (in bytes).
///
/// 50 MB limit.
pub const MAX_FILE_SIZE: usize = 50 * 1024 * 1024;

/// Maximum logs to keep in memory.
pub const MAX_LOG_ENTRIES: usize = 100;
