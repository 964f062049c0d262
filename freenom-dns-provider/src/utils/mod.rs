//! Utility modules.

/// Log sanitization utilities to prevent credential and token exposure.
pub mod log_sanitizer;
