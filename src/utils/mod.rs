//! Utils module - Shared utilities and helpers

/// Verbose logging helpers
pub mod logging;

/// Input validation and sanitization utilities
pub mod validation;
