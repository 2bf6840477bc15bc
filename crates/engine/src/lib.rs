//! # Liftboard Engine
//!
//! The engine turns the user's search intent into a visible table state.
//!
//! - `ResultsFetcher` builds a query from `QueryParameters`, runs it against the
//!   injected `ResultsSource`, and turns every failure into a `FetchError`.
//! - `ViewSession` is the loading/loaded/failed state machine. Every parameter change
//!   starts a new fetch generation; a resolution that arrives for an older generation
//!   is discarded, so the visible state always matches the latest parameters.
//!
//! The current `ViewSnapshot` is published over a `tokio::sync::watch` channel. Each
//! transition replaces the snapshot in a single step, so a reader never sees records
//! from one fetch alongside an error from another.

pub mod error;
pub mod fetcher;
pub mod session;
pub mod state;

pub use error::{FetchError, LOAD_FAILED_MESSAGE};
pub use fetcher::ResultsFetcher;
pub use session::{FetchTicket, ViewSession};
pub use state::{ViewSnapshot, ViewState};
