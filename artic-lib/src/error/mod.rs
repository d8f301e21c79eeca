//! Error types

mod api;
mod input;

pub use api::*;
pub use input::*;

/// Top-level error type for the library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A remote fetch did not complete successfully.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// User-supplied input was rejected before any I/O was issued.
    #[error(transparent)]
    Input(#[from] InputError),
}
