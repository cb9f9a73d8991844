//! Shared error-classification trait.

// =============================================================================
// ERROR CODES
// =============================================================================

/// Grepable error code and retryable flag for structured error output.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}
