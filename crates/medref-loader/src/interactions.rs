//! Pairwise interaction aggregation.
//!
//! Given already-resolved medications, looks up every unordered pair in the
//! [`InteractionGraph`], drops pairs below the report threshold and returns
//! the rest most-severe first. Pure over in-memory data; no I/O.

use std::collections::HashSet;
use std::sync::Arc;

use medref_types::{CanonicalMedication, InteractionResult};
use thiserror::Error;

use crate::graph::InteractionGraph;
use crate::types::ReportPolicy;

/// Structured failure of an interaction check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// One or more inputs did not match any known medication.
    #[error("Unable to match medications: {}", .0.join(", "))]
    Unresolved(Vec<String>),

    /// Fewer than two medications were supplied.
    #[error("Add at least two medications to run an interaction check (found {found}).")]
    InsufficientInputs {
        /// How many medications were supplied.
        found: usize,
    },
}

/// Checks every pair of `meds` against `graph`.
///
/// Inputs are de-duplicated by slug (first occurrence kept) before pairing,
/// so a medication never interacts with itself. Pairs without a graph entry
/// are skipped. Results are stable-sorted by severity rank.
///
/// # Errors
/// Returns [`CheckError::InsufficientInputs`] when fewer than two
/// medications are given; no lookup is attempted in that case.
pub fn check_interactions(
    meds: &[CanonicalMedication],
    graph: &InteractionGraph,
    policy: &ReportPolicy,
) -> Result<Vec<InteractionResult>, CheckError> {
    if meds.len() < 2 {
        return Err(CheckError::InsufficientInputs { found: meds.len() });
    }

    let unique = dedupe_by_slug(meds);
    let mut results = Vec::new();

    for (i, a) in unique.iter().enumerate() {
        for b in &unique[i + 1..] {
            let Some(severity) = graph.severity(&a.slug, &b.slug) else {
                continue;
            };
            if policy.reports(severity) {
                results.push(InteractionResult::flagged(a, b, severity));
            }
        }
    }

    // Vec::sort_by_key is stable, so pair-generation order holds within a rank.
    results.sort_by_key(|r| r.severity);
    Ok(results)
}

/// Keeps the first medication seen for each slug, preserving order.
pub fn dedupe_by_slug(meds: &[CanonicalMedication]) -> Vec<&CanonicalMedication> {
    let mut seen = HashSet::new();
    meds.iter()
        .filter(|med| seen.insert(med.slug.as_str()))
        .collect()
}

/// A source of interaction data for resolved medications.
///
/// One implementation is chosen per deployment.
pub trait InteractionProvider: Send + Sync {
    /// Short identifier for logs and health output.
    fn name(&self) -> &'static str;

    /// Returns flagged interactions among `meds`.
    fn check(&self, meds: &[CanonicalMedication]) -> Result<Vec<InteractionResult>, CheckError>;
}

/// Provider backed by the pre-generated static interaction graph.
#[derive(Debug, Clone)]
pub struct StaticGraphProvider {
    graph: Arc<InteractionGraph>,
    policy: ReportPolicy,
}

impl StaticGraphProvider {
    /// Creates a provider over `graph` with the given policy.
    pub fn new(graph: Arc<InteractionGraph>, policy: ReportPolicy) -> Self {
        Self { graph, policy }
    }

    /// Returns the underlying graph.
    pub fn graph(&self) -> &InteractionGraph {
        &self.graph
    }

    /// Returns the report policy.
    pub fn policy(&self) -> ReportPolicy {
        self.policy
    }
}

impl InteractionProvider for StaticGraphProvider {
    fn name(&self) -> &'static str {
        "static-graph"
    }

    fn check(&self, meds: &[CanonicalMedication]) -> Result<Vec<InteractionResult>, CheckError> {
        check_interactions(meds, &self.graph, &self.policy)
    }
}
