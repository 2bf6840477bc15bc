use thiserror::Error;

/// The message shown in place of the table when a fetch fails.
pub const LOAD_FAILED_MESSAGE: &str = "Error loading data";

/// A failed fetch, reduced to what the user is shown.
///
/// The underlying cause is logged by the fetcher and never leaves it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    pub fn load_failed() -> Self {
        Self {
            message: LOAD_FAILED_MESSAGE.to_string(),
        }
    }
}
