//! # medref-loader
//!
//! Reference data loading and pure lookup logic for the medication
//! interaction checker.
//!
//! - [`SynonymIndex`] maps brand names, abbreviations and combination
//!   product spellings to one canonical medication.
//! - [`InteractionGraph`] is the precomputed, symmetric pairwise severity
//!   map; [`GraphBuilder`] produces it from DDInter CSV downloads.
//! - [`check_interactions`] pairs resolved medications and reports the
//!   flagged pairs, most severe first.
//! - [`MedicationCatalog`] backs browsing, search and autocomplete.
//!
//! ## Features
//!
//! - `parallel` (default): parse DDInter files concurrently with rayon.
//!
//! ## Usage
//!
//! ```rust
//! use medref_loader::{check_interactions, InteractionGraph, ReportPolicy, SynonymIndex};
//! use medref_loader::medref_types::{MedicationRecord, Severity};
//!
//! let records = vec![
//!     MedicationRecord::new("apixaban", "Apixaban (Eliquis)"),
//!     MedicationRecord::new("linezolid", "Linezolid"),
//! ];
//! let index = SynonymIndex::build(&records);
//!
//! let mut graph = InteractionGraph::new();
//! graph.insert_pair("apixaban", "linezolid", Severity::Moderate);
//!
//! let meds = index.resolve_all(&["eliquis", "LINEZOLID"]).unwrap();
//! let results = check_interactions(&meds, &graph, &ReportPolicy::default()).unwrap();
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].severity, Severity::Moderate);
//! ```

#![warn(missing_docs)]

pub mod catalog;
pub mod ddinter;
pub mod graph;
pub mod interactions;
pub mod loader;
pub mod parser;
pub mod store;
pub mod synonym;
pub mod types;

// Re-export main types at crate root
pub use catalog::{MedicationCatalog, ALL_TAGS, DEFAULT_SUGGESTION_LIMIT};
pub use ddinter::{discover_ddinter_files, load_ddinter_file, load_ddinter_rows, DdinterRow};
#[cfg(feature = "parallel")]
pub use ddinter::load_ddinter_rows_parallel;
pub use graph::{GraphBuilder, GraphMeta, InteractionGraph};
pub use interactions::{
    check_interactions, dedupe_by_slug, CheckError, InteractionProvider, StaticGraphProvider,
};
pub use loader::{
    discover_data_files, load_interaction_graph, load_medications, write_interaction_graph,
};
pub use parser::{CsvParser, CsvRecord};
pub use store::ReferenceStore;
pub use synonym::{expand_tokens, normalize_medication_name, SynonymIndex};
pub use types::{CsvConfig, DataFiles, DdinterFile, LoadError, LoadResult, ReportPolicy};

// Re-export medref-types for convenience
pub use medref_types;
