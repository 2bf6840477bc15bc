//! # Liftboard Database Crate
//!
//! This crate is the application's view of the remote results store: the
//! `lifting_results` collection.
//!
//! ## Architectural Principles
//!
//! - **Layer 3 Adapter:** This crate encapsulates everything storage-specific. The rest
//!   of the application only sees the `ResultsSource` capability, a `select` over the
//!   collection with an optional exact-name filter and a row limit.
//! - **Swappable Source:** `DbRepository` talks to PostgreSQL through a connection pool
//!   (`PgPool`); `InMemorySource` serves a fixed record set for tests and offline use.
//!
//! ## Public API
//!
//! - `connect` / `connect_lazy`: Establish the database connection pool, eagerly or on first use.
//! - `run_migrations`: Applies the bundled migration that creates `lifting_results`.
//! - `ResultsSource` / `ResultsQuery`: The select capability and its request shape.
//! - `DbRepository`: The PostgreSQL-backed `ResultsSource`.
//! - `InMemorySource`: A fixture-backed `ResultsSource`.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod memory;
pub mod query;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, connect_lazy, run_migrations, ConnectionOptions};
pub use error::DbError;
pub use memory::InMemorySource;
pub use query::{ResultsQuery, ResultsSource, RESULTS_TABLE, RESULT_COLUMNS};
pub use repository::DbRepository;
