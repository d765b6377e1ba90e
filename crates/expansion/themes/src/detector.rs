//! Theme Detector — keyword trigger matching.
//!
//! A message fires a theme when any of the theme's trigger phrases occurs
//! in its lower-cased text. Detection is non-exclusive and the result is an
//! ordered set, so the outcome never depends on catalog order.

use std::collections::BTreeSet;

use expansion_taxonomy::ThemeId;

use crate::catalog::ThemeCatalog;

/// Stateless matcher over a fixed set of trigger phrases.
#[derive(Clone, Debug)]
pub struct ThemeDetector {
    triggers: Vec<(ThemeId, Vec<String>)>,
}

impl ThemeDetector {
    /// Build a detector from a validated catalog (phrases already lower-cased).
    pub fn new(catalog: &ThemeCatalog) -> Self {
        Self {
            triggers: catalog
                .iter()
                .map(|t| (t.id.clone(), t.keywords.clone()))
                .collect(),
        }
    }

    /// Themes whose triggers occur in `message`. Blank input yields an empty set.
    pub fn detect(&self, message: &str) -> BTreeSet<ThemeId> {
        let text = message.to_lowercase();
        if text.trim().is_empty() {
            return BTreeSet::new();
        }

        self.triggers
            .iter()
            .filter(|(_, phrases)| phrases.iter().any(|p| text.contains(p.as_str())))
            .map(|(theme, _)| theme.clone())
            .collect()
    }

    /// Trigger phrases of `theme` that occur in `message`, in configured order.
    pub fn matched_keywords<'a>(&'a self, theme: &ThemeId, message: &str) -> Vec<&'a str> {
        let text = message.to_lowercase();
        self.triggers
            .iter()
            .filter(|(id, _)| id == theme)
            .flat_map(|(_, phrases)| phrases.iter())
            .filter(|p| text.contains(p.as_str()))
            .map(String::as_str)
            .collect()
    }

    pub fn theme_count(&self) -> usize {
        self.triggers.len()
    }
}

impl Default for ThemeDetector {
    fn default() -> Self {
        Self::new(&ThemeCatalog::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(set: &BTreeSet<ThemeId>) -> Vec<&str> {
        set.iter().map(|t| t.as_str()).collect()
    }

    #[test]
    fn detects_case_insensitively() {
        let detector = ThemeDetector::default();
        let themes = detector.detect("HOW TO USE this serum?");
        assert_eq!(ids(&themes), vec!["product_usage"]);
    }

    #[test]
    fn multiple_themes_may_fire() {
        let detector = ThemeDetector::default();
        let themes = detector.detect("Is this FDA certified and safe during pregnancy?");
        assert_eq!(ids(&themes), vec!["certification_compliance", "safety_suitability"]);
    }

    #[test]
    fn shared_trigger_fires_both_themes() {
        // "organic" belongs to certification and ingredient themes.
        let detector = ThemeDetector::default();
        let themes = detector.detect("is it organic");
        assert_eq!(
            ids(&themes),
            vec!["certification_compliance", "ingredient_composition"]
        );
    }

    #[test]
    fn blank_message_yields_nothing() {
        let detector = ThemeDetector::default();
        assert!(detector.detect("").is_empty());
        assert!(detector.detect("   \n").is_empty());
    }

    #[test]
    fn unmatched_message_yields_nothing() {
        let detector = ThemeDetector::default();
        assert!(detector.detect("where is my parcel").is_empty());
    }

    #[test]
    fn matched_keywords_lists_hits() {
        let detector = ThemeDetector::default();
        let hits = detector.matched_keywords(&"product_usage".into(), "How often should I apply it?");
        assert_eq!(hits, vec!["how often", "apply"]);
    }

    #[test]
    fn detection_is_deterministic() {
        let detector = ThemeDetector::default();
        let msg = "Can I get a refund or exchange with a coupon?";
        assert_eq!(detector.detect(msg), detector.detect(msg));
        assert_eq!(detector.theme_count(), 6);
    }
}
