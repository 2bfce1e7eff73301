//! Interaction result type.

use crate::{CanonicalMedication, Severity};

/// Advisory sentence appended to every flagged interaction.
pub const ADVISORY_SUFFIX: &str = "Reassess the regimen or monitor closely per clinical guidance.";

/// A flagged pairwise interaction, produced per request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InteractionResult {
    /// Normalized severity.
    pub severity: Severity,
    /// Human-readable explanation.
    pub description: String,
    /// Display names of the two medications, in pair order.
    pub drugs: [String; 2],
}

impl InteractionResult {
    /// Builds the result for a pair found in the interaction graph.
    pub fn flagged(a: &CanonicalMedication, b: &CanonicalMedication, severity: Severity) -> Self {
        Self {
            severity,
            description: format!(
                "{} and {} carry a {} interaction. {}",
                a.name, b.name, severity, ADVISORY_SUFFIX
            ),
            drugs: [a.name.clone(), b.name.clone()],
        }
    }
}
