//! Medication synonym index.
//!
//! Maps free-text, brand and generic names to a canonical medication.
//!
//! ## Collision rule
//!
//! The first record to register a normalized key owns it permanently.
//! Later records that would produce the same key are ignored, so the order
//! of the input dataset decides which medication a shared alias points to.
//! Changing this would silently relabel drugs, so merging or rejecting
//! collisions is deliberately not done.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use medref_types::{CanonicalMedication, MedicationRecord};
use regex::Regex;

/// Delimiters separating the parts of a compound name.
static TOKEN_DELIMITERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[/+,&]|\band\b|\bwith\b").unwrap());

/// Normalizes a medication name into a lookup key.
///
/// Lowercases, replaces every character other than ASCII letters, digits
/// and `+` with a space, collapses whitespace and trims.
///
/// ```
/// use medref_loader::normalize_medication_name;
///
/// assert_eq!(normalize_medication_name("  Hydrocodone/APAP "), "hydrocodone apap");
/// assert_eq!(normalize_medication_name("GLP-1"), "glp 1");
/// assert_eq!(normalize_medication_name("APAP + codeine"), "apap + codeine");
/// ```
pub fn normalize_medication_name(value: &str) -> String {
    let mapped: String = value
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '+' {
                c
            } else {
                ' '
            }
        })
        .collect();

    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits a compound name on `/`, `+`, `,`, `&`, "and" and "with".
///
/// Segments are trimmed; empty segments are dropped.
pub fn expand_tokens(value: &str) -> Vec<&str> {
    TOKEN_DELIMITERS
        .split(value)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Immutable lookup from normalized synonym to canonical medication.
///
/// Built once with [`SynonymIndex::build`] and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct SynonymIndex {
    synonyms: HashMap<String, CanonicalMedication>,
}

impl SynonymIndex {
    /// Builds the index from the dataset, in order.
    ///
    /// For each record the surface forms are: the full name, the name with
    /// parentheticals removed, the slug as words, each keyword and each
    /// segment of every parenthetical. Every surface form is registered,
    /// then re-split on the compound delimiters and each piece registered.
    pub fn build(records: &[MedicationRecord]) -> Self {
        let mut index = Self::default();

        for record in records {
            let canonical = record.canonical();

            for surface in surface_forms(record) {
                index.register(&surface, &canonical);
                for child in expand_tokens(&surface) {
                    index.register(child, &canonical);
                }
            }
        }

        index
    }

    /// Registers a single synonym unless its key is empty or already taken.
    fn register(&mut self, candidate: &str, canonical: &CanonicalMedication) {
        let key = normalize_medication_name(candidate);
        if key.is_empty() {
            return;
        }
        self.synonyms
            .entry(key)
            .or_insert_with(|| canonical.clone());
    }

    /// Resolves user input to a canonical medication.
    ///
    /// Returns `None` when the normalized input is empty or unknown.
    pub fn resolve(&self, input: &str) -> Option<&CanonicalMedication> {
        let key = normalize_medication_name(input);
        if key.is_empty() {
            return None;
        }
        self.synonyms.get(&key)
    }

    /// Resolves every input, collecting all failures.
    ///
    /// On success returns the canonical medications in input order. If any
    /// input fails, returns every unmatched input verbatim, in order.
    pub fn resolve_all<S: AsRef<str>>(
        &self,
        inputs: &[S],
    ) -> Result<Vec<CanonicalMedication>, Vec<String>> {
        let mut resolved = Vec::with_capacity(inputs.len());
        let mut unmatched = Vec::new();

        for input in inputs {
            match self.resolve(input.as_ref()) {
                Some(canonical) => resolved.push(canonical.clone()),
                None => unmatched.push(input.as_ref().to_string()),
            }
        }

        if unmatched.is_empty() {
            Ok(resolved)
        } else {
            Err(unmatched)
        }
    }

    /// Returns the number of registered synonyms.
    pub fn len(&self) -> usize {
        self.synonyms.len()
    }

    /// Returns true if no synonyms are registered.
    pub fn is_empty(&self) -> bool {
        self.synonyms.is_empty()
    }

    /// Iterates over normalized keys and their canonical medications.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CanonicalMedication)> {
        self.synonyms.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Collects the distinct surface forms of a record in registration order.
fn surface_forms(record: &MedicationRecord) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut forms = Vec::new();
    let mut push = |value: String| {
        if seen.insert(value.clone()) {
            forms.push(value);
        }
    };

    push(record.name.clone());

    let base = record.base_name();
    if !base.is_empty() {
        push(base);
    }

    push(record.slug_words());

    for keyword in &record.keywords {
        push(keyword.clone());
    }

    for inner in record.parentheticals() {
        for token in expand_tokens(inner) {
            push(token.to_string());
        }
    }

    forms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Vec<MedicationRecord> {
        vec![
            MedicationRecord::new("semaglutide", "Semaglutide (Ozempic/Wegovy)")
                .with_keywords(["semaglutide", "ozempic", "wegovy", "glp-1", "incretin"]),
            MedicationRecord::new("tirzepatide", "Tirzepatide (Mounjaro/Zepbound)")
                .with_keywords(["tirzepatide", "mounjaro", "zepbound", "dual incretin"]),
            MedicationRecord::new("sacubitril-valsartan", "Sacubitril/valsartan (Entresto)")
                .with_keywords(["sacubitril", "valsartan", "entresto", "arni"]),
            MedicationRecord::new("hydrocodone-apap", "Hydrocodone + APAP (Norco & Vicodin)")
                .with_keywords(["hydrocodone/APAP"]),
            MedicationRecord::new("linezolid", "Linezolid")
                .with_keywords(["linezolid", "zyvox", "antibiotic"]),
        ]
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_medication_name("Ozempic"), "ozempic");
        assert_eq!(normalize_medication_name(" OZEMPIC "), "ozempic");
        assert_eq!(normalize_medication_name("Semaglutide (Ozempic/Wegovy)"), "semaglutide ozempic wegovy");
        assert_eq!(normalize_medication_name("   "), "");
        assert_eq!(normalize_medication_name("()/-"), "");
    }

    #[test]
    fn test_expand_tokens() {
        assert_eq!(expand_tokens("Ozempic/Wegovy"), vec!["Ozempic", "Wegovy"]);
        assert_eq!(expand_tokens("Norco & Vicodin"), vec!["Norco", "Vicodin"]);
        assert_eq!(expand_tokens("APAP + codeine"), vec!["APAP", "codeine"]);
        assert_eq!(expand_tokens("drug A AND drug B"), vec!["drug A", "drug B"]);
        assert_eq!(expand_tokens("X with Y, Z"), vec!["X", "Y", "Z"]);
        // "and" inside a word is not a delimiter
        assert_eq!(expand_tokens("Sandostatin"), vec!["Sandostatin"]);
    }

    #[test]
    fn test_resolve_own_name() {
        let records = dataset();
        let index = SynonymIndex::build(&records);

        for record in &records {
            let resolved = index.resolve(&record.name).unwrap();
            assert_eq!(resolved, &record.canonical());
        }
    }

    #[test]
    fn test_alias_equivalence() {
        let index = SynonymIndex::build(&dataset());

        for input in ["Ozempic", "ozempic", " OZEMPIC ", "semaglutide", "Wegovy", "glp-1"] {
            let resolved = index.resolve(input).unwrap();
            assert_eq!(resolved.slug, "semaglutide", "input {input:?}");
        }
    }

    #[test]
    fn test_compound_names_register_parts() {
        let index = SynonymIndex::build(&dataset());

        assert_eq!(index.resolve("Entresto").unwrap().slug, "sacubitril-valsartan");
        assert_eq!(index.resolve("valsartan").unwrap().slug, "sacubitril-valsartan");
        assert_eq!(index.resolve("sacubitril valsartan").unwrap().slug, "sacubitril-valsartan");
        assert_eq!(index.resolve("hydrocodone").unwrap().slug, "hydrocodone-apap");
        assert_eq!(index.resolve("apap").unwrap().slug, "hydrocodone-apap");
        assert_eq!(index.resolve("Vicodin").unwrap().slug, "hydrocodone-apap");
        assert_eq!(index.resolve("hydrocodone + apap").unwrap().slug, "hydrocodone-apap");
    }

    #[test]
    fn test_unknown_and_empty_input() {
        let index = SynonymIndex::build(&dataset());

        assert!(index.resolve("not-a-real-drug-xyz").is_none());
        assert!(index.resolve("").is_none());
        assert!(index.resolve("   \t ").is_none());
        assert!(index.resolve("???").is_none());
    }

    #[test]
    fn test_first_registration_wins() {
        let records = vec![
            MedicationRecord::new("empagliflozin", "Empagliflozin (Jardiance)")
                .with_keywords(["sglt2", "ckd"]),
            MedicationRecord::new("dapagliflozin", "Dapagliflozin (Farxiga)")
                .with_keywords(["sglt2", "ckd"]),
        ];

        let index = SynonymIndex::build(&records);
        assert_eq!(index.resolve("SGLT2").unwrap().slug, "empagliflozin");
        assert_eq!(index.resolve("ckd").unwrap().slug, "empagliflozin");
        assert_eq!(index.resolve("farxiga").unwrap().slug, "dapagliflozin");

        let reversed: Vec<_> = records.into_iter().rev().collect();
        let index = SynonymIndex::build(&reversed);
        assert_eq!(index.resolve("SGLT2").unwrap().slug, "dapagliflozin");
    }

    #[test]
    fn test_resolve_all_collects_failures() {
        let index = SynonymIndex::build(&dataset());

        let ok = index.resolve_all(&["Ozempic", "Zyvox"]).unwrap();
        assert_eq!(ok[0].slug, "semaglutide");
        assert_eq!(ok[1].slug, "linezolid");

        let err = index
            .resolve_all(&["Ozempic", "foo", "Zyvox", " bar "])
            .unwrap_err();
        assert_eq!(err, vec!["foo".to_string(), " bar ".to_string()]);
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = SynonymIndex::build(&dataset());
        let b = SynonymIndex::build(&dataset());
        assert_eq!(a.len(), b.len());
        for (key, canonical) in a.iter() {
            assert_eq!(b.resolve(key), Some(canonical));
        }
    }
}
