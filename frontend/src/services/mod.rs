//! Backend services.
//!
//! This module provides services for backend communication:
//!
//! # Services
//!
//! - [`preview`] - File upload for per-file previews
//! - [`convert`] - Conversion requests and browser downloads

pub mod convert;
pub mod preview;

pub use convert::*;
pub use preview::*;
