//! Interaction severity.
//!
//! Severities are ordered by clinical rank: `Major` sorts first and is the
//! most severe; `Unknown` sorts last.

use std::fmt;

/// Severity label attached to a pairwise drug interaction.
///
/// The derived ordering follows the rank (major=1, moderate=2, minor=3,
/// unknown=4), so `a < b` means `a` is more severe than `b`.
///
/// # Examples
///
/// ```
/// use medref_types::Severity;
///
/// assert_eq!(Severity::parse(" Moderate "), Severity::Moderate);
/// assert_eq!(Severity::parse("contraindicated"), Severity::Unknown);
/// assert_eq!(Severity::Major.rank(), 1);
/// assert_eq!(Severity::Major.more_severe(Severity::Minor), Severity::Major);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    /// Clinically significant; avoid or change therapy.
    Major,
    /// Monitor closely or adjust dosing.
    Moderate,
    /// Minimal clinical effect.
    Minor,
    /// Source did not classify the interaction.
    Unknown,
}

impl Severity {
    /// All severities, most severe first.
    pub const ALL: [Severity; 4] = [
        Severity::Major,
        Severity::Moderate,
        Severity::Minor,
        Severity::Unknown,
    ];

    /// Normalizes a raw label.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Anything unrecognized becomes `Unknown`.
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("major") {
            Self::Major
        } else if label.eq_ignore_ascii_case("moderate") {
            Self::Moderate
        } else if label.eq_ignore_ascii_case("minor") {
            Self::Minor
        } else {
            Self::Unknown
        }
    }

    /// Returns the numeric rank (lower is more severe).
    pub fn rank(self) -> u8 {
        match self {
            Self::Major => 1,
            Self::Moderate => 2,
            Self::Minor => 3,
            Self::Unknown => 4,
        }
    }

    /// Returns the lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Moderate => "moderate",
            Self::Minor => "minor",
            Self::Unknown => "unknown",
        }
    }

    /// Returns whichever of the two severities is more severe.
    pub fn more_severe(self, other: Self) -> Self {
        self.min(other)
    }

    /// Returns true if this severity is at least as severe as `threshold`.
    pub fn meets(self, threshold: Self) -> bool {
        self <= threshold
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
