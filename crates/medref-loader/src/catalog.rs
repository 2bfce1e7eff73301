//! In-memory medication catalog.
//!
//! Holds the curated dataset for browsing: lookup by slug, tag listing,
//! free-text search and autocomplete suggestions.

use std::collections::{BTreeSet, HashMap, HashSet};

use medref_types::MedicationRecord;

use crate::synonym::expand_tokens;
use crate::types::{LoadError, LoadResult};

/// Default number of autocomplete suggestions.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 8;

/// Tag value meaning "no tag filter".
pub const ALL_TAGS: &str = "All";

/// Read-only medication catalog.
#[derive(Debug, Clone)]
pub struct MedicationCatalog {
    records: Vec<MedicationRecord>,
    by_slug: HashMap<String, usize>,
    /// Lowercased search blob per record, same order as `records`.
    search_blobs: Vec<String>,
    /// Autocomplete surface forms, dataset order, de-duplicated.
    suggestions: Vec<String>,
}

impl MedicationCatalog {
    /// Creates a catalog, keeping dataset order.
    ///
    /// # Errors
    /// Returns [`LoadError::DuplicateSlug`] if two records share a slug.
    pub fn new(records: Vec<MedicationRecord>) -> LoadResult<Self> {
        let mut by_slug = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if by_slug.insert(record.slug.clone(), i).is_some() {
                return Err(LoadError::DuplicateSlug {
                    slug: record.slug.clone(),
                });
            }
        }

        let search_blobs = records.iter().map(search_blob).collect();
        let suggestions = suggestion_names(&records);

        Ok(Self {
            records,
            by_slug,
            search_blobs,
            suggestions,
        })
    }

    /// Gets a record by slug.
    pub fn get(&self, slug: &str) -> Option<&MedicationRecord> {
        self.by_slug.get(slug).map(|&i| &self.records[i])
    }

    /// Returns all records in dataset order.
    pub fn records(&self) -> &[MedicationRecord] {
        &self.records
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns every distinct tag, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let tags: BTreeSet<&str> = self
            .records
            .iter()
            .flat_map(|r| r.tags.iter().map(String::as_str))
            .collect();
        tags.into_iter().collect()
    }

    /// Filters records by tag, then by case-insensitive substring match
    /// over the clinical text. `None` or `"All"` disables the tag filter;
    /// an empty query matches every record.
    pub fn search(&self, query: &str, tag: Option<&str>) -> Vec<&MedicationRecord> {
        let query = query.trim().to_lowercase();
        let tag = tag.filter(|t| !t.is_empty() && *t != ALL_TAGS);

        self.records
            .iter()
            .zip(&self.search_blobs)
            .filter(|(record, _)| tag.map_or(true, |t| record.tags.iter().any(|rt| rt == t)))
            .filter(|(_, blob)| query.is_empty() || blob.contains(&query))
            .map(|(record, _)| record)
            .collect()
    }

    /// Returns up to `limit` display names containing `query`,
    /// case-insensitively. A blank query yields nothing.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<&str> {
        let query = query.to_lowercase();
        if query.trim().is_empty() {
            return Vec::new();
        }

        self.suggestions
            .iter()
            .filter(|name| name.to_lowercase().contains(&query))
            .take(limit)
            .map(String::as_str)
            .collect()
    }
}

fn search_blob(record: &MedicationRecord) -> String {
    let mut parts = vec![
        record.name.as_str(),
        record.class.as_str(),
        record.summary.as_str(),
        record.dose.as_str(),
        record.renal.as_str(),
        record.monitoring.as_str(),
    ];
    parts.extend(record.pearls.iter().map(String::as_str));
    parts.extend(record.keywords.iter().map(String::as_str));
    parts.join(" ").to_lowercase()
}

fn suggestion_names(records: &[MedicationRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for record in records {
        let base = record.base_name();
        let mut forms = vec![record.name.clone()];
        if !base.is_empty() && base != record.name {
            forms.push(base);
        }
        forms.push(record.slug_words());
        if let Some(first) = record.parentheticals().first() {
            forms.extend(expand_tokens(first).into_iter().map(str::to_string));
        }

        for form in forms {
            if !form.is_empty() && seen.insert(form.clone()) {
                names.push(form);
            }
        }
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> MedicationCatalog {
        let mut sema = MedicationRecord::new("semaglutide", "Semaglutide (Ozempic/Wegovy)")
            .with_tags(["GLP-1", "Cardiometabolic", "Weight"])
            .with_keywords(["semaglutide", "ozempic"]);
        sema.class = "GLP-1 receptor agonist".to_string();
        sema.pearls = vec!["Suspend 1 week before anesthesia.".to_string()];

        let mut apix = MedicationRecord::new("apixaban", "Apixaban (Eliquis)")
            .with_tags(["Anticoag", "Cardiology"])
            .with_keywords(["apixaban", "eliquis", "doac"]);
        apix.monitoring = "CBC + renal panel q6-12 months.".to_string();

        let line = MedicationRecord::new("linezolid", "Linezolid")
            .with_tags(["Infectious Disease"])
            .with_keywords(["linezolid", "zyvox"]);

        MedicationCatalog::new(vec![sema, apix, line]).unwrap()
    }

    #[test]
    fn test_get_and_len() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("apixaban").unwrap().name, "Apixaban (Eliquis)");
        assert!(catalog.get("warfarin").is_none());
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let err = MedicationCatalog::new(vec![
            MedicationRecord::new("a", "A"),
            MedicationRecord::new("a", "A again"),
        ])
        .unwrap_err();
        assert!(matches!(err, LoadError::DuplicateSlug { slug } if slug == "a"));
    }

    #[test]
    fn test_tags_sorted_distinct() {
        assert_eq!(
            catalog().tags(),
            vec!["Anticoag", "Cardiology", "Cardiometabolic", "GLP-1", "Infectious Disease", "Weight"]
        );
    }

    #[test]
    fn test_search_by_text() {
        let catalog = catalog();

        let hits: Vec<_> = catalog.search("ANESTHESIA", None).into_iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(hits, vec!["semaglutide"]);

        let hits: Vec<_> = catalog.search("renal panel", None).into_iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(hits, vec!["apixaban"]);

        assert_eq!(catalog.search("", None).len(), 3);
        assert_eq!(catalog.search("  ", Some(ALL_TAGS)).len(), 3);
        assert!(catalog.search("nothing matches this", None).is_empty());
    }

    #[test]
    fn test_search_by_tag() {
        let catalog = catalog();

        let hits: Vec<_> = catalog.search("", Some("Cardiology")).into_iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(hits, vec!["apixaban"]);

        assert!(catalog.search("zyvox", Some("Cardiology")).is_empty());
        assert_eq!(catalog.search("zyvox", Some("Infectious Disease")).len(), 1);
    }

    #[test]
    fn test_suggest() {
        let catalog = catalog();

        assert_eq!(
            catalog.suggest("ozem", DEFAULT_SUGGESTION_LIMIT),
            vec!["Semaglutide (Ozempic/Wegovy)", "Ozempic"]
        );
        assert_eq!(
            catalog.suggest("apix", DEFAULT_SUGGESTION_LIMIT),
            vec!["Apixaban (Eliquis)", "Apixaban", "apixaban"]
        );
        assert_eq!(catalog.suggest("a", 2).len(), 2);
        assert!(catalog.suggest("   ", DEFAULT_SUGGESTION_LIMIT).is_empty());
    }
}
