//! Input validation error types

/// Errors for user input rejected before any I/O is issued.
///
/// These are recoverable by construction: the triggering operation is a
/// no-op and the prior state is untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// The bulk-selection quota must be a positive integer.
    #[error("invalid selection quota: {value}")]
    InvalidQuota {
        /// The rejected quota value.
        value: u64,
    },

    /// Page indexes are 1-based; zero is not a page.
    #[error("invalid page index: {value}")]
    InvalidPage {
        /// The rejected page index.
        value: u32,
    },
}
