//! # expansion-taxonomy
//!
//! The taxonomy side of intent expansion: customer messages, the existing
//! intent hierarchy they are classified into, and the data tables that map
//! detected themes back onto that hierarchy.
//!
//! ```text
//!   Message ─────────────▶ theme detection (expansion-themes)
//!   IntentHierarchy ─────▶ parent / overlap resolution
//!   TaxonomyMapping ─────▶   theme → parent intent
//!                            theme → overlapping intents
//! ```
//!
//! Everything here is loaded once per run and read-only afterwards.

#![deny(unsafe_code)]

pub mod error;
pub mod hierarchy;
pub mod mapping;
pub mod types;

// ── Re-exports ─────────────────────────────────────────────────────────

pub use error::{TaxonomyError, TaxonomyResult};
pub use hierarchy::{HierarchyDocument, IntentHierarchy, IntentRef, PrimaryIntent, SecondaryIntent};
pub use mapping::TaxonomyMapping;
pub use types::{IntentId, IntentSummary, Message, ThemeId};
