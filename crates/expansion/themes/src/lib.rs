//! # expansion-themes
//!
//! Keyword-driven theme detection over a customer message corpus.
//!
//! ```text
//!   ThemeCatalog ──▶ ThemeDetector ──▶ detect(text) → {theme}
//!                          │
//!   [Message] ─────────────┴──▶ ClusterAggregator ──▶ {theme → ThemeCluster}
//! ```
//!
//! Keyword sets are static configuration. Nothing here learns from data.

#![deny(unsafe_code)]

pub mod catalog;
pub mod cluster;
pub mod detector;
pub mod error;

// ── Re-exports ─────────────────────────────────────────────────────────

pub use catalog::{ThemeCatalog, ThemeDefinition};
pub use cluster::{share_of, ClusterAggregator, ThemeCluster, MAX_CLUSTER_SAMPLES};
pub use detector::ThemeDetector;
pub use error::{ThemeError, ThemeResult};
