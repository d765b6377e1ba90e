//! Theme catalog — the static keyword configuration.
//!
//! Each theme carries the trigger phrases the detector matches and the
//! wording a proposal for it will use (name, description, rationale).
//! Trigger phrases are lower-cased at construction. Surrounding spaces are
//! kept, so `" use "` only matches `use` as a separate word.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use expansion_taxonomy::ThemeId;

use crate::error::{ThemeError, ThemeResult};

// ── Theme Definition ───────────────────────────────────────────────────

/// One configured theme.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeDefinition {
    pub id: ThemeId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub rationale: String,
    pub keywords: Vec<String>,
}

impl ThemeDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        rationale: impl Into<String>,
        keywords: &[&str],
    ) -> Self {
        Self {
            id: ThemeId::new(id),
            name: name.into(),
            description: description.into(),
            rationale: rationale.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

// ── Theme Catalog ──────────────────────────────────────────────────────

/// Validated set of theme definitions, in configuration order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ThemeDefinition>", into = "Vec<ThemeDefinition>")]
pub struct ThemeCatalog {
    themes: Vec<ThemeDefinition>,
}

impl TryFrom<Vec<ThemeDefinition>> for ThemeCatalog {
    type Error = ThemeError;

    fn try_from(themes: Vec<ThemeDefinition>) -> Result<Self, Self::Error> {
        Self::new(themes)
    }
}

impl From<ThemeCatalog> for Vec<ThemeDefinition> {
    fn from(catalog: ThemeCatalog) -> Self {
        catalog.themes
    }
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ThemeCatalog {
    /// Validate and normalize a list of theme definitions.
    pub fn new(mut themes: Vec<ThemeDefinition>) -> ThemeResult<Self> {
        let mut seen = BTreeSet::new();

        for theme in &mut themes {
            if theme.id.as_str().trim().is_empty() {
                return Err(ThemeError::EmptyThemeId {
                    name: theme.name.clone(),
                });
            }
            if !seen.insert(theme.id.clone()) {
                return Err(ThemeError::DuplicateTheme(theme.id.to_string()));
            }
            for keyword in &mut theme.keywords {
                let normalized = keyword.to_lowercase();
                if normalized.trim().is_empty() {
                    return Err(ThemeError::BlankKeyword(theme.id.to_string()));
                }
                *keyword = normalized;
            }
        }

        Ok(Self { themes })
    }

    pub fn get(&self, id: &ThemeId) -> Option<&ThemeDefinition> {
        self.themes.iter().find(|t| &t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ThemeDefinition> {
        self.themes.iter()
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Configured trigger phrases for a theme (empty for unknown themes).
    pub fn keywords(&self, id: &ThemeId) -> &[String] {
        self.get(id).map(|t| t.keywords.as_slice()).unwrap_or(&[])
    }

    /// Built-in catalog for e-commerce customer support traffic.
    pub fn builtin() -> Self {
        let themes = vec![
            ThemeDefinition::new(
                "product_usage",
                "Product Usage",
                "Customer specifically asks how to use/apply/consume a product (dosage, frequency, routine, application method)",
                "Usage instructions differ fundamentally from general product information. Splitting improves recommendation accuracy and enables targeted usage guides.",
                &[
                    "how to use", "how do i use", "how should i use", "how to apply",
                    "how much", "how many", "how often", "dosage", "dose", "frequency",
                    "how long", "when should", "what time", "apply", "routine", "layer",
                    "before or after", "mix with", "combine", "dilute", "drops",
                ],
            ),
            ThemeDefinition::new(
                "certification_compliance",
                "Certification & Compliance",
                "Customer asks about product certifications (FDA, GMP, ISO, USDA, cruelty-free, vegan, halal, etc.)",
                "Certification queries indicate specific trust/compliance concerns. Separate handling enables direct certification display and compliance documentation.",
                &[
                    "certified", "certification", "fda", "gmp", "iso", "usda", "organic",
                    "cruelty-free", "cruelty free", "vegan", "halal", "peta", "leaping bunny",
                    "dermatologist", "dermatologically tested", "clinical", "tested", "approved",
                ],
            ),
            ThemeDefinition::new(
                "safety_suitability",
                "Safety & Suitability",
                "Customer asks about product safety for specific conditions (pregnancy, children, allergies, sensitive skin, medical conditions)",
                "Safety queries require careful, liability-aware responses. Separating enables medical disclaimers and condition-specific guidance.",
                &[
                    "safe", "safety", "pregnant", "pregnancy", "breastfeeding", "kids", "children",
                    "side effects", "allergic", "reaction", "sensitive skin", "broken skin",
                    "contraindication", "eczema", "hypoallergenic",
                ],
            ),
            ThemeDefinition::new(
                "ingredient_composition",
                "Ingredient Details",
                "Customer asks about specific ingredients, compositions, concentrations, or formulation details",
                "Ingredient queries often come from informed customers needing technical details. Enables ingredient database lookup and allergen checking.",
                &[
                    "ingredient", "contain", "paraben", "fragrance", "artificial", "gluten",
                    "preservative", "chemical", "natural", "organic", "active ingredient",
                    "percentage", "concentration", "ph level", "texture",
                ],
            ),
            ThemeDefinition::new(
                "return_exchange",
                "Returns & Exchanges",
                "Customer wants to return, exchange, or get refund for products",
                "Returns/exchanges involve specific policies and processes different from cancellation or general order management.",
                &[
                    "return", "exchange", "refund", "money back", "guarantee", "warranty",
                    "damaged", "wrong product", "replace",
                ],
            ),
            ThemeDefinition::new(
                "pricing_promotions",
                "Pricing & Promotions",
                "Customer asks about discounts, coupons, bundles, loyalty programs, or promotional offers",
                "Promotional queries can be handled with real-time offer lookup rather than generic payment information.",
                &[
                    "discount", "coupon", "promo", "offer", "sale", "bundle", "combo",
                    "student discount", "bulk discount", "loyalty", "points", "reward",
                ],
            ),
        ];

        // The literal table above is already normalized and unique.
        Self { themes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_six_themes() {
        let catalog = ThemeCatalog::builtin();
        assert_eq!(catalog.len(), 6);
        assert!(catalog.get(&"product_usage".into()).is_some());
        assert_eq!(catalog.keywords(&"return_exchange".into()).len(), 9);
    }

    #[test]
    fn builtin_passes_validation() {
        let themes: Vec<ThemeDefinition> = ThemeCatalog::builtin().into();
        let rebuilt = ThemeCatalog::new(themes).unwrap();
        assert_eq!(rebuilt, ThemeCatalog::builtin());
    }

    #[test]
    fn keywords_are_normalized() {
        let catalog = ThemeCatalog::new(vec![ThemeDefinition::new(
            "gift_cards",
            "Gift Cards",
            "Customer asks about buying or redeeming gift cards",
            "",
            &["Gift Card", "VOUCHER"],
        )])
        .unwrap();
        assert_eq!(
            catalog.keywords(&"gift_cards".into()),
            &["gift card".to_string(), "voucher".to_string()]
        );
    }

    #[test]
    fn keyword_padding_is_preserved() {
        let catalog = ThemeCatalog::new(vec![ThemeDefinition::new(
            "usage",
            "Usage",
            "Customer asks how to use a product",
            "",
            &[" Use "],
        )])
        .unwrap();
        assert_eq!(catalog.keywords(&"usage".into()), &[" use ".to_string()]);

        let detector = crate::detector::ThemeDetector::new(&catalog);
        assert_eq!(detector.detect("How do I use it?").len(), 1);
        assert!(detector.detect("new user signup").is_empty());
    }

    #[test]
    fn rejects_blank_keyword() {
        let err = ThemeCatalog::new(vec![ThemeDefinition::new("a", "A", "d", "", &["ok", "   "])])
            .unwrap_err();
        assert!(matches!(err, ThemeError::BlankKeyword(id) if id == "a"));
    }

    #[test]
    fn rejects_duplicate_and_empty_ids() {
        let dup = ThemeCatalog::new(vec![
            ThemeDefinition::new("a", "A", "d", "", &["x"]),
            ThemeDefinition::new("a", "A2", "d", "", &["y"]),
        ]);
        assert!(matches!(dup, Err(ThemeError::DuplicateTheme(_))));

        let empty = ThemeCatalog::new(vec![ThemeDefinition::new("", "Nameless", "d", "", &["x"])]);
        assert!(matches!(empty, Err(ThemeError::EmptyThemeId { .. })));
    }

    #[test]
    fn deserializes_from_list() {
        let json = r#"[{"id": "gift_cards", "name": "Gift Cards",
                       "description": "Gift card questions", "keywords": ["Gift Card"]}]"#;
        let catalog: ThemeCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.keywords(&"gift_cards".into()), &["gift card".to_string()]);
        assert!(catalog.get(&"gift_cards".into()).unwrap().rationale.is_empty());
    }
}
