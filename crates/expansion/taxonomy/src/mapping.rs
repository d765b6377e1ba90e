//! Theme-to-taxonomy mapping tables.
//!
//! Two lookups tie a detected theme back to the existing taxonomy: the
//! parent intent a new intent would live under, and the existing intents it
//! overlaps with (which turns a `new` proposal into a `split`). Both are
//! plain data so a different taxonomy only needs a different table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::hierarchy::IntentHierarchy;
use crate::types::{IntentId, ThemeId};

/// Injectable theme → parent and theme → overlap tables.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyMapping {
    #[serde(default)]
    pub parents: BTreeMap<ThemeId, IntentId>,
    #[serde(default)]
    pub overlaps: BTreeMap<ThemeId, Vec<IntentId>>,
}

impl TaxonomyMapping {
    /// Empty mapping: every theme is parentless and novel.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table for the e-commerce support taxonomy.
    pub fn builtin() -> Self {
        let parents = [
            ("product_usage", "about_product"),
            ("certification_compliance", "about_product"),
            ("safety_suitability", "about_product"),
            ("ingredient_composition", "about_product"),
            ("return_exchange", "order_management"),
            ("pricing_promotions", "payment"),
        ]
        .into_iter()
        .map(|(theme, parent)| (ThemeId::from(theme), IntentId::from(parent)))
        .collect();

        let overlaps = [
            ("product_usage", vec!["product_info"]),
            ("certification_compliance", vec!["product_info"]),
            ("safety_suitability", vec!["product_info"]),
            ("ingredient_composition", vec!["product_info"]),
            (
                "return_exchange",
                vec!["order_cancellation", "order_modification"],
            ),
            ("pricing_promotions", vec!["payment_methods"]),
        ]
        .into_iter()
        .map(|(theme, ids)| {
            (
                ThemeId::from(theme),
                ids.into_iter().map(IntentId::from).collect(),
            )
        })
        .collect();

        Self { parents, overlaps }
    }

    /// Parent intent a proposal for `theme` would attach to.
    pub fn parent_for(&self, theme: &ThemeId) -> Option<&IntentId> {
        self.parents.get(theme)
    }

    /// Existing intents that overlap `theme`, in table order.
    pub fn overlaps_for(&self, theme: &ThemeId) -> &[IntentId] {
        self.overlaps.get(theme).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn with_parent(mut self, theme: impl Into<String>, parent: impl Into<String>) -> Self {
        self.parents
            .insert(ThemeId::new(theme), IntentId::new(parent));
        self
    }

    pub fn with_overlaps<I, S>(mut self, theme: impl Into<String>, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.overlaps.insert(
            ThemeId::new(theme),
            ids.into_iter().map(IntentId::new).collect(),
        );
        self
    }

    /// Mapping targets that do not exist in `hierarchy`, deduplicated and sorted.
    pub fn unknown_references(&self, hierarchy: &IntentHierarchy) -> Vec<IntentId> {
        let mut unknown: Vec<IntentId> = self
            .parents
            .values()
            .chain(self.overlaps.values().flatten())
            .filter(|id| !hierarchy.contains(id))
            .cloned()
            .collect();
        unknown.sort();
        unknown.dedup();
        unknown
    }
}
