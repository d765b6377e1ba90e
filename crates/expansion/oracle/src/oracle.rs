use std::time::Duration;

use async_trait::async_trait;

use crate::error::{OracleError, OracleResult};
use crate::types::{CandidateTheme, OracleContext, OracleProvider};

/// An advisory source of candidate themes.
///
/// Implementations make at most one external call per invocation and never
/// retry. Callers treat every error as "no candidates".
#[async_trait]
pub trait EnrichmentOracle: Send + Sync {
    /// Backend this oracle talks to.
    fn provider(&self) -> OracleProvider;

    /// Whether a call can be attempted at all (credential present).
    fn is_available(&self) -> bool;

    /// Ask the backend for themes the existing intents do not cover.
    async fn propose_themes(
        &self,
        samples: &[String],
        context: &OracleContext,
    ) -> OracleResult<Vec<CandidateTheme>>;
}

/// Run `propose_themes` under a timeout.
pub async fn propose_with_timeout(
    oracle: &dyn EnrichmentOracle,
    samples: &[String],
    context: &OracleContext,
    timeout: Duration,
) -> OracleResult<Vec<CandidateTheme>> {
    match tokio::time::timeout(timeout, oracle.propose_themes(samples, context)).await {
        Ok(result) => result,
        Err(_) => Err(OracleError::Timeout(timeout.as_secs())),
    }
}

/// Oracle that always returns a fixed candidate list. Used by tests and
/// offline runs.
#[derive(Clone, Debug, Default)]
pub struct StaticOracle {
    candidates: Vec<CandidateTheme>,
}

impl StaticOracle {
    pub fn new(candidates: Vec<CandidateTheme>) -> Self {
        Self { candidates }
    }
}

#[async_trait]
impl EnrichmentOracle for StaticOracle {
    fn provider(&self) -> OracleProvider {
        OracleProvider::OpenAi
    }

    fn is_available(&self) -> bool {
        true
    }

    async fn propose_themes(
        &self,
        _samples: &[String],
        _context: &OracleContext,
    ) -> OracleResult<Vec<CandidateTheme>> {
        Ok(self.candidates.clone())
    }
}
