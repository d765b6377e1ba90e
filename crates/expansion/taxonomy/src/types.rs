//! Core type definitions shared by every stage of the expansion pipeline.
//!
//! Identifiers for intents and themes, the customer message record, and the
//! compact intent summary handed to enrichment backends.

use serde::{Deserialize, Serialize};

// ── Identifier Types ────────────────────────────────────────────────────

/// Identifier of an intent in the existing taxonomy (primary or secondary).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntentId(pub String);

impl IntentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IntentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IntentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Key of a configured theme (e.g. `product_usage`).
///
/// Themes order by their key, which gives clusters and proposals a stable
/// tie-break independent of configuration order.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeId(pub String);

impl ThemeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable title: `product_usage` → `Product Usage`.
    pub fn title(&self) -> String {
        self.0
            .split('_')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for ThemeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ThemeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

// ── Message ─────────────────────────────────────────────────────────────

/// A customer message with its prior conversation turns.
///
/// The history is carried opaquely; theme detection only reads `text`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub text: String,
    #[serde(default)]
    pub history: Vec<serde_json::Value>,
}

impl Message {
    pub fn new(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            history: Vec::new(),
        }
    }
}

// ── Intent Summary ──────────────────────────────────────────────────────

/// Flattened `name: description` view of an existing intent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentSummary {
    pub id: IntentId,
    pub name: String,
    pub description: String,
}
