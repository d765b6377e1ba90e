//! Confidence scorer — bounded proposal confidence from cluster statistics.
//!
//! Three sub-scores, each clamped to [0, 1]:
//! - **Count**: `log10(count + 1) / 2`, saturating around 100 hits
//! - **Percentage**: `percentage / 10`, saturating at 10% of traffic
//! - **Novelty**: fixed 0.8 without overlapping intents, 0.5 with
//!
//! The weighted sum is rounded to two decimal places.

use serde::{Deserialize, Serialize};

use expansion_taxonomy::IntentId;
use expansion_themes::ThemeCluster;

const NOVEL_SCORE: f64 = 0.8;
const OVERLAPPING_SCORE: f64 = 0.5;
const COUNT_LOG_SATURATION: f64 = 2.0;
const PERCENTAGE_SATURATION: f64 = 10.0;

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ── Scoring Weights ────────────────────────────────────────────────────

/// Weights for composing the confidence score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub count_weight: f64,
    /// Share of traffic is the strongest business signal.
    pub percentage_weight: f64,
    pub novelty_weight: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            count_weight: 0.3,
            percentage_weight: 0.4,
            novelty_weight: 0.3,
        }
    }
}

/// Sub-scores behind one confidence value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub count_score: f64,
    pub percentage_score: f64,
    pub novelty_score: f64,
    pub confidence: f64,
}

// ── Confidence Scorer ──────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct ConfidenceScorer {
    pub weights: ScoringWeights,
}

impl ConfidenceScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Confidence for `cluster` given the existing intents it overlaps.
    pub fn score(&self, cluster: &ThemeCluster, overlaps: &[IntentId]) -> f64 {
        self.breakdown(cluster, overlaps).confidence
    }

    pub fn breakdown(&self, cluster: &ThemeCluster, overlaps: &[IntentId]) -> ScoreBreakdown {
        let count_score = clamp_unit(((cluster.count as f64) + 1.0).log10() / COUNT_LOG_SATURATION);
        let percentage_score = clamp_unit(cluster.percentage / PERCENTAGE_SATURATION);
        let novelty_score = if overlaps.is_empty() {
            NOVEL_SCORE
        } else {
            OVERLAPPING_SCORE
        };

        let combined = self.weights.count_weight * count_score
            + self.weights.percentage_weight * percentage_score
            + self.weights.novelty_weight * novelty_score;

        ScoreBreakdown {
            count_score,
            percentage_score,
            novelty_score,
            confidence: round2(clamp_unit(combined)),
        }
    }
}

/// Clamp to [0, 1]; NaN maps to 0.
fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
