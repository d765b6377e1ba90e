//! The existing intent hierarchy — a read-only view over the taxonomy.
//!
//! Primary intents own ordered secondary intents. Ids are unique across the
//! union of both levels; this is checked once at construction and the
//! hierarchy is immutable afterwards.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{TaxonomyError, TaxonomyResult};
use crate::types::{IntentId, IntentSummary};

// ── Intent Records ─────────────────────────────────────────────────────

/// A secondary intent nested under a primary intent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryIntent {
    pub id: IntentId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A primary intent with its ordered secondary intents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryIntent {
    pub id: IntentId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "secondary_intents", default)]
    pub secondary: Vec<SecondaryIntent>,
}

/// Borrowed view of any intent in the hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntentRef<'a> {
    Primary(&'a PrimaryIntent),
    Secondary {
        parent: &'a PrimaryIntent,
        intent: &'a SecondaryIntent,
    },
}

impl<'a> IntentRef<'a> {
    pub fn id(&self) -> &'a IntentId {
        match self {
            Self::Primary(p) => &p.id,
            Self::Secondary { intent, .. } => &intent.id,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            Self::Primary(p) => &p.name,
            Self::Secondary { intent, .. } => &intent.name,
        }
    }

    /// Parent id for secondary intents, `None` for primaries.
    pub fn parent_id(&self) -> Option<&'a IntentId> {
        match self {
            Self::Primary(_) => None,
            Self::Secondary { parent, .. } => Some(&parent.id),
        }
    }
}

// ── Serialized Form ────────────────────────────────────────────────────

/// Wire shape of the hierarchy (`{"primary_intents": [...]}`).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HierarchyDocument {
    #[serde(default)]
    pub primary_intents: Vec<PrimaryIntent>,
}

// ── Intent Hierarchy ───────────────────────────────────────────────────

/// Validated, read-only intent hierarchy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HierarchyDocument", into = "HierarchyDocument")]
pub struct IntentHierarchy {
    primary: Vec<PrimaryIntent>,
}

impl TryFrom<HierarchyDocument> for IntentHierarchy {
    type Error = TaxonomyError;

    fn try_from(doc: HierarchyDocument) -> Result<Self, Self::Error> {
        Self::new(doc.primary_intents)
    }
}

impl From<IntentHierarchy> for HierarchyDocument {
    fn from(hierarchy: IntentHierarchy) -> Self {
        Self {
            primary_intents: hierarchy.primary,
        }
    }
}

impl IntentHierarchy {
    /// Build a hierarchy, rejecting empty or duplicate ids.
    pub fn new(primary: Vec<PrimaryIntent>) -> TaxonomyResult<Self> {
        let mut seen: BTreeSet<&str> = BTreeSet::new();

        for p in &primary {
            Self::check_id(&p.id, &p.name, &mut seen)?;
            for s in &p.secondary {
                Self::check_id(&s.id, &s.name, &mut seen)?;
            }
        }

        Ok(Self { primary })
    }

    fn check_id<'a>(
        id: &'a IntentId,
        name: &str,
        seen: &mut BTreeSet<&'a str>,
    ) -> TaxonomyResult<()> {
        if id.as_str().trim().is_empty() {
            return Err(TaxonomyError::EmptyIntentId {
                name: name.to_string(),
            });
        }
        if !seen.insert(id.as_str()) {
            return Err(TaxonomyError::DuplicateIntentId(id.to_string()));
        }
        Ok(())
    }

    /// Primary intents in declaration order.
    pub fn primary_intents(&self) -> &[PrimaryIntent] {
        &self.primary
    }

    /// Every intent, primaries first, each followed by its secondaries.
    pub fn iter(&self) -> impl Iterator<Item = IntentRef<'_>> {
        self.primary.iter().flat_map(|p| {
            std::iter::once(IntentRef::Primary(p)).chain(
                p.secondary
                    .iter()
                    .map(move |s| IntentRef::Secondary { parent: p, intent: s }),
            )
        })
    }

    /// All intent ids across both levels.
    pub fn all_intent_ids(&self) -> BTreeSet<&IntentId> {
        self.iter().map(|i| i.id()).collect()
    }

    pub fn contains(&self, id: &IntentId) -> bool {
        self.iter().any(|i| i.id() == id)
    }

    pub fn find(&self, id: &IntentId) -> Option<IntentRef<'_>> {
        self.iter().find(|i| i.id() == id)
    }

    /// Number of primary intents.
    pub fn primary_count(&self) -> usize {
        self.primary.len()
    }

    /// Number of intents across both levels.
    pub fn total_count(&self) -> usize {
        self.primary.iter().map(|p| 1 + p.secondary.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty()
    }

    /// Summaries of the primary intents, the context enrichment backends see.
    pub fn summaries(&self) -> Vec<IntentSummary> {
        self.primary
            .iter()
            .map(|p| IntentSummary {
                id: p.id.clone(),
                name: p.name.clone(),
                description: p.description.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secondary(id: &str, name: &str) -> SecondaryIntent {
        SecondaryIntent {
            id: id.into(),
            name: name.into(),
            description: format!("{} questions", name),
        }
    }

    fn sample_primaries() -> Vec<PrimaryIntent> {
        vec![
            PrimaryIntent {
                id: "about_product".into(),
                name: "About Product".into(),
                description: "Questions about products".into(),
                secondary: vec![secondary("product_info", "Product Info")],
            },
            PrimaryIntent {
                id: "order_management".into(),
                name: "Order Management".into(),
                description: "Order lifecycle".into(),
                secondary: vec![
                    secondary("order_cancellation", "Cancellation"),
                    secondary("order_modification", "Modification"),
                ],
            },
        ]
    }

    #[test]
    fn builds_and_counts() {
        let h = IntentHierarchy::new(sample_primaries()).unwrap();
        assert_eq!(h.primary_count(), 2);
        assert_eq!(h.total_count(), 5);
        assert_eq!(h.all_intent_ids().len(), 5);
        assert!(!h.is_empty());
    }

    #[test]
    fn rejects_duplicate_across_levels() {
        let mut primaries = sample_primaries();
        primaries[1].secondary.push(secondary("about_product", "Dup"));
        let err = IntentHierarchy::new(primaries).unwrap_err();
        assert!(matches!(err, TaxonomyError::DuplicateIntentId(id) if id == "about_product"));
    }

    #[test]
    fn rejects_empty_id() {
        let mut primaries = sample_primaries();
        primaries[0].secondary.push(secondary("  ", "Blank"));
        let err = IntentHierarchy::new(primaries).unwrap_err();
        assert!(matches!(err, TaxonomyError::EmptyIntentId { .. }));
    }

    #[test]
    fn find_reports_parent() {
        let h = IntentHierarchy::new(sample_primaries()).unwrap();
        let found = h.find(&"order_cancellation".into()).unwrap();
        assert_eq!(found.name(), "Cancellation");
        assert_eq!(found.parent_id().map(|p| p.as_str()), Some("order_management"));

        let primary = h.find(&"about_product".into()).unwrap();
        assert!(primary.parent_id().is_none());
        assert!(h.find(&"missing".into()).is_none());
    }

    #[test]
    fn iter_preserves_declaration_order() {
        let h = IntentHierarchy::new(sample_primaries()).unwrap();
        let ids: Vec<&str> = h.iter().map(|i| i.id().as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "about_product",
                "product_info",
                "order_management",
                "order_cancellation",
                "order_modification"
            ]
        );
    }

    #[test]
    fn deserializes_through_validation() {
        let json = r#"{"primary_intents": [
            {"id": "payment", "name": "Payment", "description": "Paying",
             "secondary_intents": [{"id": "payment_methods", "name": "Methods", "description": "How to pay"}]}
        ]}"#;
        let h: IntentHierarchy = serde_json::from_str(json).unwrap();
        assert!(h.contains(&"payment_methods".into()));

        let dup = r#"{"primary_intents": [
            {"id": "payment", "secondary_intents": [{"id": "payment"}]}
        ]}"#;
        assert!(serde_json::from_str::<IntentHierarchy>(dup).is_err());
    }

    #[test]
    fn summaries_cover_primaries() {
        let h = IntentHierarchy::new(sample_primaries()).unwrap();
        let summaries = h.summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].name, "About Product");
    }
}
