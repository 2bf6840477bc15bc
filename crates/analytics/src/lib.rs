//! # Liftboard Analytics Engine
//!
//! This crate derives summary statistics from a loaded page of lifting results.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of the data
//!   source or of how results are displayed. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `AggregationEngine` takes the records currently
//!   on screen and produces percentages. Nothing is cached; callers recompute on
//!   every read, which stays cheap because a page holds at most 1000 rows.
//!
//! ## Public API
//!
//! - `AggregationEngine`: The calculator for per-column success rates.
//! - `SuccessRateReport`: All six attempt columns summarized at once.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AggregationEngine;
pub use report::{LiftSuccessRate, SuccessRateReport};
