//! Cluster Aggregator — groups matched messages by theme.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use expansion_taxonomy::{Message, ThemeId};

use crate::catalog::ThemeCatalog;
use crate::detector::ThemeDetector;

/// Maximum number of sample texts kept per cluster.
pub const MAX_CLUSTER_SAMPLES: usize = 5;

/// Summary statistics for the messages matching one theme.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThemeCluster {
    pub theme: ThemeId,
    /// Configured trigger phrases of the theme.
    pub keywords: Vec<String>,
    /// Contributing message ids, first-seen order, no duplicates.
    pub message_ids: Vec<u64>,
    /// First message texts in input order.
    pub samples: Vec<String>,
    /// Number of (message, theme) hits.
    pub count: usize,
    /// `100 * count / total`, 0 for an empty corpus.
    pub percentage: f64,
}

impl ThemeCluster {
    fn empty(theme: ThemeId, keywords: Vec<String>) -> Self {
        Self {
            theme,
            keywords,
            message_ids: Vec::new(),
            samples: Vec::new(),
            count: 0,
            percentage: 0.0,
        }
    }
}

/// Percentage of `total` that `count` represents; 0 when `total` is 0.
pub fn share_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * count as f64 / total as f64
    }
}

/// Folds messages into per-theme clusters.
#[derive(Clone, Debug)]
pub struct ClusterAggregator {
    catalog: ThemeCatalog,
    max_samples: usize,
}

impl ClusterAggregator {
    pub fn new(catalog: ThemeCatalog) -> Self {
        Self {
            catalog,
            max_samples: MAX_CLUSTER_SAMPLES,
        }
    }

    /// Override the per-cluster sample bound.
    pub fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = max_samples;
        self
    }

    pub fn catalog(&self) -> &ThemeCatalog {
        &self.catalog
    }

    /// Run the detector over every message and build the sparse cluster map.
    ///
    /// Themes with no hits are absent from the result.
    pub fn aggregate(
        &self,
        messages: &[Message],
        detector: &ThemeDetector,
    ) -> BTreeMap<ThemeId, ThemeCluster> {
        let mut clusters: BTreeMap<ThemeId, ThemeCluster> = BTreeMap::new();
        let mut seen: HashMap<ThemeId, HashSet<u64>> = HashMap::new();

        for message in messages {
            for theme in detector.detect(&message.text) {
                let cluster = clusters.entry(theme.clone()).or_insert_with(|| {
                    let keywords = self.catalog.keywords(&theme).to_vec();
                    ThemeCluster::empty(theme.clone(), keywords)
                });

                cluster.count += 1;
                if seen.entry(theme).or_default().insert(message.id) {
                    cluster.message_ids.push(message.id);
                }
                if cluster.samples.len() < self.max_samples {
                    cluster.samples.push(message.text.clone());
                }
            }
        }

        let total = messages.len();
        for cluster in clusters.values_mut() {
            cluster.percentage = share_of(cluster.count, total);
            debug!(
                theme = %cluster.theme,
                count = cluster.count,
                percentage = cluster.percentage,
                "Theme cluster built"
            );
        }

        clusters
    }
}

impl Default for ClusterAggregator {
    fn default() -> Self {
        Self::new(ThemeCatalog::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(texts: &[&str]) -> Vec<Message> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Message::new(i as u64, *t))
            .collect()
    }

    #[test]
    fn aggregates_counts_and_percentages() {
        let messages = corpus(&[
            "How to use the toner?",
            "how do i use it at night",
            "Is it vegan?",
            "where is my order",
        ]);
        let aggregator = ClusterAggregator::default();
        let clusters = aggregator.aggregate(&messages, &ThemeDetector::default());

        let usage = &clusters[&ThemeId::from("product_usage")];
        assert_eq!(usage.count, 2);
        assert_eq!(usage.message_ids, vec![0, 1]);
        assert!((usage.percentage - 50.0).abs() < f64::EPSILON);
        assert_eq!(usage.keywords.first().map(String::as_str), Some("how to use"));

        let cert = &clusters[&ThemeId::from("certification_compliance")];
        assert_eq!(cert.count, 1);
        assert!((cert.percentage - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn omits_themes_without_hits() {
        let messages = corpus(&["How to use this?"]);
        let clusters = ClusterAggregator::default().aggregate(&messages, &ThemeDetector::default());
        assert_eq!(clusters.len(), 1);
        assert!(!clusters.contains_key(&ThemeId::from("pricing_promotions")));
    }

    #[test]
    fn samples_are_bounded_and_ordered() {
        let texts: Vec<String> = (0..8).map(|i| format!("refund request {}", i)).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let clusters = ClusterAggregator::default().aggregate(&corpus(&refs), &ThemeDetector::default());

        let returns = &clusters[&ThemeId::from("return_exchange")];
        assert_eq!(returns.count, 8);
        assert_eq!(returns.samples.len(), MAX_CLUSTER_SAMPLES);
        assert_eq!(returns.samples[0], "refund request 0");
        assert_eq!(returns.samples[4], "refund request 4");
    }

    #[test]
    fn message_counts_once_per_theme() {
        let messages = corpus(&["Is it safe and FDA approved?"]);
        let clusters = ClusterAggregator::default().aggregate(&messages, &ThemeDetector::default());
        assert_eq!(clusters.len(), 2);
        assert!(clusters.values().all(|c| c.count == 1));
    }

    #[test]
    fn repeated_ids_are_deduplicated() {
        let messages = vec![Message::new(7, "refund please"), Message::new(7, "refund again")];
        let clusters = ClusterAggregator::default().aggregate(&messages, &ThemeDetector::default());
        let returns = &clusters[&ThemeId::from("return_exchange")];
        assert_eq!(returns.count, 2);
        assert_eq!(returns.message_ids, vec![7]);
    }

    #[test]
    fn large_cluster_keeps_first_seen_id_order() {
        // Every id appears twice, second pass in reverse order.
        let n = 50_000u64;
        let messages: Vec<Message> = (0..n)
            .chain((0..n).rev())
            .map(|id| Message::new(id, "refund please"))
            .collect();
        let clusters = ClusterAggregator::default().aggregate(&messages, &ThemeDetector::default());

        let returns = &clusters[&ThemeId::from("return_exchange")];
        assert_eq!(returns.count, 2 * n as usize);
        assert_eq!(returns.message_ids.len(), n as usize);
        assert!(returns.message_ids.iter().copied().eq(0..n));
        assert_eq!(returns.percentage, 100.0);
    }

    #[test]
    fn empty_corpus_is_empty() {
        let clusters = ClusterAggregator::default().aggregate(&[], &ThemeDetector::default());
        assert!(clusters.is_empty());
        assert_eq!(share_of(0, 0), 0.0);
        assert_eq!(share_of(3, 0), 0.0);
    }

    #[test]
    fn custom_sample_bound() {
        let messages = corpus(&["coupon a", "coupon b", "coupon c"]);
        let clusters = ClusterAggregator::default()
            .with_max_samples(1)
            .aggregate(&messages, &ThemeDetector::default());
        assert_eq!(clusters[&ThemeId::from("pricing_promotions")].samples, vec!["coupon a"]);
    }
}
