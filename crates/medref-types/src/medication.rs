//! Medication record types.
//!
//! `MedicationRecord` is one row of the curated reference dataset;
//! `CanonicalMedication` is the identity every synonym resolves to.

/// A curated medication entry from the reference dataset.
///
/// Records are loaded once at startup and never mutated. The `name` may
/// embed brand names in parentheses, e.g. `Semaglutide (Ozempic/Wegovy)`.
///
/// # Examples
///
/// ```
/// use medref_types::MedicationRecord;
///
/// let record = MedicationRecord::new("semaglutide", "Semaglutide (Ozempic/Wegovy)")
///     .with_keywords(["semaglutide", "ozempic", "wegovy"]);
///
/// assert_eq!(record.base_name(), "Semaglutide");
/// assert_eq!(record.slug_words(), "semaglutide");
/// assert_eq!(record.canonical().slug, "semaglutide");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MedicationRecord {
    /// Unique stable identifier, lowercase and hyphenated.
    pub slug: String,
    /// Display name, possibly with a parenthetical brand list.
    pub name: String,
    /// Pharmacologic class.
    #[cfg_attr(feature = "serde", serde(default))]
    pub class: String,
    /// One-line clinical summary.
    #[cfg_attr(feature = "serde", serde(default))]
    pub summary: String,
    /// Dosing guidance.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dose: String,
    /// Renal dosing guidance.
    #[cfg_attr(feature = "serde", serde(default))]
    pub renal: String,
    /// Monitoring guidance.
    #[cfg_attr(feature = "serde", serde(default))]
    pub monitoring: String,
    /// Practice pearls.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pearls: Vec<String>,
    /// Display tags used for filtering (e.g. "GLP-1", "Cardiology").
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
    /// Lowercase search and synonym tokens.
    #[cfg_attr(feature = "serde", serde(default))]
    pub keywords: Vec<String>,
}

impl MedicationRecord {
    /// Creates a record with only a slug and display name.
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the keyword list.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the tag list.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the canonical identity for this record.
    pub fn canonical(&self) -> CanonicalMedication {
        CanonicalMedication::new(self.slug.clone(), self.name.clone())
    }

    /// Returns the display name with every parenthetical removed and
    /// whitespace collapsed.
    pub fn base_name(&self) -> String {
        let mut out = String::with_capacity(self.name.len());
        let mut rest = self.name.as_str();

        while let Some(open) = rest.find('(') {
            match rest[open..].find(')') {
                Some(close) => {
                    out.push_str(&rest[..open]);
                    out.push(' ');
                    rest = &rest[open + close + 1..];
                }
                None => break,
            }
        }
        out.push_str(rest);

        out.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Returns the contents of every parenthetical in the display name.
    ///
    /// `Sacubitril/valsartan (Entresto)` yields `["Entresto"]`.
    pub fn parentheticals(&self) -> Vec<&str> {
        let mut found = Vec::new();
        let mut rest = self.name.as_str();

        while let Some(open) = rest.find('(') {
            let after = &rest[open + 1..];
            match after.find(')') {
                Some(close) => {
                    if close > 0 {
                        found.push(&after[..close]);
                    }
                    rest = &after[close + 1..];
                }
                None => break,
            }
        }

        found
    }

    /// Returns the slug with hyphens replaced by spaces.
    pub fn slug_words(&self) -> String {
        self.slug.replace('-', " ")
    }
}

/// The single authoritative identity a free-text drug reference resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanonicalMedication {
    /// Slug of the underlying `MedicationRecord`.
    pub slug: String,
    /// Display name of the underlying `MedicationRecord`.
    pub name: String,
}

impl CanonicalMedication {
    /// Creates a canonical identity.
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
        }
    }
}
