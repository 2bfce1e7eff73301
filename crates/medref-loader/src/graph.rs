//! Precomputed pairwise interaction graph.
//!
//! The graph is an undirected adjacency map keyed by medication slug. Each
//! edge is stored in both directions with the same severity label. When
//! several raw rows describe the same unordered pair, the most severe label
//! is kept.
//!
//! ```ignore
//! let index = SynonymIndex::build(&records);
//! let mut builder = GraphBuilder::new(&index).with_names(&records);
//! for row in load_ddinter_rows(&files)? {
//!     builder.ingest(&row);
//! }
//! let graph = builder.build();
//! graph.check_symmetry()?;
//! ```

use std::collections::{BTreeMap, BTreeSet};

use medref_types::{MedicationRecord, Severity};
use serde::{Deserialize, Serialize};

use crate::ddinter::DdinterRow;
use crate::synonym::SynonymIndex;
use crate::types::{LoadError, LoadResult};

/// Provenance block written alongside the adjacency map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphMeta {
    /// Name of the upstream dataset.
    #[serde(default)]
    pub source: String,
    /// Upstream website.
    #[serde(default)]
    pub website: String,
    /// Upstream license.
    #[serde(default)]
    pub license: String,
    /// RFC 3339 timestamp of generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    /// Category codes of the source files that were ingested.
    #[serde(default)]
    pub download_codes: Vec<String>,
    /// Raw rows read across all source files.
    #[serde(default)]
    pub total_rows: usize,
    /// Distinct unordered medication pairs matched.
    #[serde(default)]
    pub matched_pairs: usize,
}

/// Static interaction graph artifact.
///
/// Read-only after load. Serialized form is
/// `{ "meta": {...}, "names": {slug: name}, "adjacency": {slug: {slug: label}} }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionGraph {
    /// Provenance, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<GraphMeta>,
    /// Display names keyed by slug.
    #[serde(default)]
    pub names: BTreeMap<String, String>,
    /// Raw severity labels keyed by slug, then partner slug.
    #[serde(default)]
    pub adjacency: BTreeMap<String, BTreeMap<String, String>>,
}

impl InteractionGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw label stored for `a -> b`.
    pub fn raw_label(&self, a: &str, b: &str) -> Option<&str> {
        self.adjacency.get(a)?.get(b).map(String::as_str)
    }

    /// Returns the normalized severity for `a -> b`, or `None` when the
    /// pair has no entry. A missing entry means "no data", not "safe".
    pub fn severity(&self, a: &str, b: &str) -> Option<Severity> {
        self.raw_label(a, b).map(Severity::parse)
    }

    /// Returns every partner of `slug` with its normalized severity.
    pub fn partners(&self, slug: &str) -> Vec<(&str, Severity)> {
        self.adjacency
            .get(slug)
            .map(|partners| {
                partners
                    .iter()
                    .map(|(partner, label)| (partner.as_str(), Severity::parse(label)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the display name recorded for `slug`.
    pub fn display_name(&self, slug: &str) -> Option<&str> {
        self.names.get(slug).map(String::as_str)
    }

    /// Returns the number of medications with at least one edge.
    pub fn node_count(&self) -> usize {
        self.adjacency.values().filter(|p| !p.is_empty()).count()
    }

    /// Returns the number of unordered pairs.
    pub fn pair_count(&self) -> usize {
        let directed: usize = self.adjacency.values().map(BTreeMap::len).sum();
        directed / 2
    }

    /// Verifies every edge has a reverse edge with the same normalized
    /// severity.
    pub fn check_symmetry(&self) -> LoadResult<()> {
        for (from, partners) in &self.adjacency {
            for (to, label) in partners {
                let forward = Severity::parse(label);
                let reverse = self.severity(to, from);
                if reverse != Some(forward) {
                    return Err(LoadError::AsymmetricEdge {
                        from: from.clone(),
                        to: to.clone(),
                        forward: forward.to_string(),
                        reverse: reverse.map_or_else(|| "missing".to_string(), |s| s.to_string()),
                    });
                }
            }
        }
        Ok(())
    }

    /// Inserts `a -> b`, keeping the more severe of the existing and new
    /// label.
    fn upsert(&mut self, a: &str, b: &str, severity: Severity) {
        let partners = self.adjacency.entry(a.to_string()).or_default();
        match partners.get_mut(b) {
            Some(existing) => {
                if severity < Severity::parse(existing) {
                    *existing = severity.to_string();
                }
            }
            None => {
                partners.insert(b.to_string(), severity.to_string());
            }
        }
    }

    /// Inserts an undirected edge, keeping the more severe label.
    pub fn insert_pair(&mut self, a: &str, b: &str, severity: Severity) {
        self.upsert(a, b, severity);
        self.upsert(b, a, severity);
    }
}

/// Incrementally builds an [`InteractionGraph`] from raw source rows.
pub struct GraphBuilder<'a> {
    index: &'a SynonymIndex,
    graph: InteractionGraph,
    matched_pairs: BTreeSet<(String, String)>,
    download_codes: Vec<String>,
    total_rows: usize,
}

impl<'a> GraphBuilder<'a> {
    /// Creates a builder resolving drug names through `index`.
    pub fn new(index: &'a SynonymIndex) -> Self {
        Self {
            index,
            graph: InteractionGraph::new(),
            matched_pairs: BTreeSet::new(),
            download_codes: Vec::new(),
            total_rows: 0,
        }
    }

    /// Records the display name of every medication in the dataset.
    pub fn with_names(mut self, records: &[MedicationRecord]) -> Self {
        for record in records {
            self.graph
                .names
                .insert(record.slug.clone(), record.name.clone());
        }
        self
    }

    /// Records that rows from the given source code were ingested.
    pub fn add_download_code(&mut self, code: impl Into<String>) {
        self.download_codes.push(code.into());
    }

    /// Ingests one raw row.
    ///
    /// Returns true if the row matched two distinct medications. Rows with
    /// an unresolved side or with both sides resolving to the same slug are
    /// counted but otherwise ignored.
    pub fn ingest(&mut self, row: &DdinterRow) -> bool {
        self.total_rows += 1;

        let (Some(a), Some(b)) = (self.index.resolve(&row.drug_a), self.index.resolve(&row.drug_b))
        else {
            return false;
        };
        if a.slug == b.slug {
            return false;
        }

        let severity = Severity::parse(&row.level);
        let key = if a.slug <= b.slug {
            (a.slug.clone(), b.slug.clone())
        } else {
            (b.slug.clone(), a.slug.clone())
        };
        self.matched_pairs.insert(key);
        self.graph.insert_pair(&a.slug, &b.slug, severity);
        true
    }

    /// Ingests every row, returning how many matched.
    pub fn ingest_all<'r>(&mut self, rows: impl IntoIterator<Item = &'r DdinterRow>) -> usize {
        rows.into_iter().filter(|row| self.ingest(row)).count()
    }

    /// Returns the number of raw rows seen so far.
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Returns the number of distinct unordered pairs matched so far.
    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs.len()
    }

    /// Finishes the graph, filling in the provenance block.
    pub fn build(self) -> InteractionGraph {
        let mut graph = self.graph;
        graph.meta = Some(GraphMeta {
            source: "DDInter".to_string(),
            website: "http://ddinter.scbdd.com/".to_string(),
            license: "CC BY-NC-SA 4.0".to_string(),
            generated_at: None,
            download_codes: self.download_codes,
            total_rows: self.total_rows,
            matched_pairs: self.matched_pairs.len(),
        });
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<MedicationRecord> {
        vec![
            MedicationRecord::new("apixaban", "Apixaban (Eliquis)").with_keywords(["apixaban", "eliquis"]),
            MedicationRecord::new("linezolid", "Linezolid").with_keywords(["linezolid", "zyvox"]),
            MedicationRecord::new("tirzepatide", "Tirzepatide (Mounjaro/Zepbound)"),
        ]
    }

    fn row(a: &str, b: &str, level: &str) -> DdinterRow {
        DdinterRow {
            id_a: "DDInter1".to_string(),
            drug_a: a.to_string(),
            id_b: "DDInter2".to_string(),
            drug_b: b.to_string(),
            level: level.to_string(),
        }
    }

    #[test]
    fn test_insert_pair_is_symmetric() {
        let mut graph = InteractionGraph::new();
        graph.insert_pair("a", "b", Severity::Moderate);

        assert_eq!(graph.severity("a", "b"), Some(Severity::Moderate));
        assert_eq!(graph.severity("b", "a"), Some(Severity::Moderate));
        assert_eq!(graph.pair_count(), 1);
        assert_eq!(graph.node_count(), 2);
        assert!(graph.check_symmetry().is_ok());
    }

    #[test]
    fn test_more_severe_label_wins_in_any_order() {
        let mut graph = InteractionGraph::new();
        graph.insert_pair("a", "b", Severity::Minor);
        graph.insert_pair("b", "a", Severity::Major);
        graph.insert_pair("a", "b", Severity::Moderate);
        assert_eq!(graph.severity("a", "b"), Some(Severity::Major));
        assert_eq!(graph.severity("b", "a"), Some(Severity::Major));

        let mut graph = InteractionGraph::new();
        graph.insert_pair("a", "b", Severity::Unknown);
        graph.insert_pair("a", "b", Severity::Minor);
        assert_eq!(graph.raw_label("a", "b"), Some("minor"));
    }

    #[test]
    fn test_missing_pair_is_none() {
        let graph = InteractionGraph::new();
        assert_eq!(graph.severity("a", "b"), None);
        assert!(graph.partners("a").is_empty());
    }

    #[test]
    fn test_check_symmetry_detects_missing_reverse() {
        let mut graph = InteractionGraph::new();
        graph
            .adjacency
            .entry("a".to_string())
            .or_default()
            .insert("b".to_string(), "Major".to_string());

        match graph.check_symmetry() {
            Err(LoadError::AsymmetricEdge { from, to, reverse, .. }) => {
                assert_eq!(from, "a");
                assert_eq!(to, "b");
                assert_eq!(reverse, "missing");
            }
            other => panic!("expected asymmetric edge, got {other:?}"),
        }
    }

    #[test]
    fn test_check_symmetry_compares_normalized_labels() {
        let json = r#"{
            "names": {},
            "adjacency": {
                "a": {"b": "Major"},
                "b": {"a": "major"}
            }
        }"#;
        let graph: InteractionGraph = serde_json::from_str(json).unwrap();
        assert!(graph.check_symmetry().is_ok());
    }

    #[test]
    fn test_builder_resolves_and_merges() {
        let records = records();
        let index = SynonymIndex::build(&records);
        let mut builder = GraphBuilder::new(&index).with_names(&records);
        builder.add_download_code("B");

        assert!(builder.ingest(&row("Eliquis", "Linezolid", "Minor")));
        assert!(builder.ingest(&row("linezolid", "apixaban", "Major")));
        assert!(builder.ingest(&row("Linezolid", "Mounjaro", "Minor")));
        // Unresolved side
        assert!(!builder.ingest(&row("Warfarin", "Linezolid", "Major")));
        // Same medication on both sides
        assert!(!builder.ingest(&row("Zyvox", "Linezolid", "Major")));

        assert_eq!(builder.total_rows(), 5);
        assert_eq!(builder.matched_pairs(), 2);

        let graph = builder.build();
        assert_eq!(graph.severity("apixaban", "linezolid"), Some(Severity::Major));
        assert_eq!(graph.severity("tirzepatide", "linezolid"), Some(Severity::Minor));
        assert_eq!(graph.display_name("apixaban"), Some("Apixaban (Eliquis)"));
        assert!(graph.check_symmetry().is_ok());

        let meta = graph.meta.unwrap();
        assert_eq!(meta.total_rows, 5);
        assert_eq!(meta.matched_pairs, 2);
        assert_eq!(meta.download_codes, vec!["B"]);
    }

    #[test]
    fn test_serialized_shape() {
        let mut graph = InteractionGraph::new();
        graph.names.insert("a".to_string(), "A".to_string());
        graph.insert_pair("a", "b", Severity::Moderate);

        let value = serde_json::to_value(&graph).unwrap();
        assert_eq!(value["names"]["a"], "A");
        assert_eq!(value["adjacency"]["b"]["a"], "moderate");
        assert!(value.get("meta").is_none());
    }
}
