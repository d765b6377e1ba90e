//! # expansion-proposal
//!
//! Turns theme clusters into vetted intent proposals and a report.
//!
//! ```text
//!   {theme → ThemeCluster}
//!        │
//!        ▼
//!   ProposalGenerator ── ConfidenceScorer
//!        │  (size → percentage → cap → confidence)
//!        ▼
//!   [ProposedIntent] ──▶ GuardrailChecker ──▶ warnings
//!        │                                      │
//!        └────────────▶ ReportAssembler ◀───────┘
//!                             │
//!                             ▼
//!                       ExpansionReport
//! ```
//!
//! [`ExpansionPipeline`] wires the stages together for one run.

#![deny(unsafe_code)]

pub mod engine;
pub mod error;
pub mod generator;
pub mod guardrail;
pub mod report;
pub mod scorer;
pub mod types;

// ── Re-exports ─────────────────────────────────────────────────────────

pub use engine::{Analysis, ExpansionPipeline};
pub use error::{ExpansionError, ExpansionResult};
pub use generator::{ProposalGenerator, ProposalOutcome, ScreenReason, ScreenedCluster};
pub use guardrail::{
    GuardrailChecker, GuardrailIssue, GuardrailReport, GuardrailStatus, GuardrailVerdict,
    IssueKind, GENERIC_NAME_TERMS,
};
pub use report::{
    CandidateReview, ConfigurationSnapshot, EnrichmentSection, EnrichmentStatus, ExpansionReport,
    GuardrailSection, ProposalEntry, ReportAssembler, ReportMetadata, ThemeSummary,
};
pub use scorer::{round2, ConfidenceScorer, ScoreBreakdown, ScoringWeights};
pub use types::{ExpansionConfig, IntentLevel, ProposalAction, ProposedIntent};
