//! # rollcall-core
//!
//! Core library for rollcall - a single-tenant class attendance tracker.
//!
//! This library provides:
//! - Domain types for the roster and attendance history
//! - A pure, stateless analytics engine (streaks, consistency scores,
//!   cohort trends, calendar heatmaps, shareable summaries)
//! - A snapshot storage seam with a JSON file implementation
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! The analytics engine is the heart of the crate and is deliberately
//! boring to call: it consumes a roster slice and a normalized
//! [`History`](analytics::History), takes "today" as an argument
//! instead of reading a clock, and returns plain data. Storage, UI,
//! and export surfaces are collaborators that feed it and consume its
//! output.
//!
//! ## Example
//!
//! ```rust
//! use rollcall_core::analytics::{self, History};
//! use rollcall_core::types::Snapshot;
//! use chrono::NaiveDate;
//!
//! let snapshot = Snapshot::default();
//! let history = History::from_records(&snapshot.records);
//! let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let stats = analytics::dashboard_stats(&history, &snapshot.students, today);
//! assert_eq!(stats[0].value, "Not Taken");
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use store::{JsonSnapshotStore, SnapshotStore};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod csv;
pub mod error;
pub mod format;
pub mod logging;
pub mod store;
pub mod types;
