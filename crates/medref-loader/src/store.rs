//! Loaded reference data.
//!
//! Bundles the medication catalog, the synonym index built from it and the
//! static interaction graph. Everything is built once at startup and shared
//! read-only afterwards.
//!
//! ```ignore
//! let files = discover_data_files("data")?;
//! let store = ReferenceStore::load(&files)?;
//!
//! let meds = store.index().resolve_all(&["Ozempic", "Eliquis"])?;
//! ```

use std::sync::Arc;

use medref_types::MedicationRecord;

use crate::catalog::MedicationCatalog;
use crate::graph::InteractionGraph;
use crate::loader::{load_interaction_graph, load_medications};
use crate::synonym::SynonymIndex;
use crate::types::{DataFiles, LoadError, LoadResult};

/// Read-only medication reference data.
#[derive(Clone)]
pub struct ReferenceStore {
    catalog: Arc<MedicationCatalog>,
    index: Arc<SynonymIndex>,
    graph: Arc<InteractionGraph>,
}

impl std::fmt::Debug for ReferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferenceStore")
            .field("medications", &self.catalog.len())
            .field("synonyms", &self.index.len())
            .field("graph_nodes", &self.graph.node_count())
            .field("graph_pairs", &self.graph.pair_count())
            .finish()
    }
}

impl ReferenceStore {
    // ═══════════════════════════════════════════════════════════════════════════
    // Construction
    // ═══════════════════════════════════════════════════════════════════════════

    /// Builds the store from an in-memory dataset and graph.
    ///
    /// # Errors
    /// Returns [`LoadError::DuplicateSlug`] if the dataset repeats a slug.
    pub fn from_parts(records: Vec<MedicationRecord>, graph: InteractionGraph) -> LoadResult<Self> {
        let index = SynonymIndex::build(&records);
        let catalog = MedicationCatalog::new(records)?;

        Ok(Self {
            catalog: Arc::new(catalog),
            index: Arc::new(index),
            graph: Arc::new(graph),
        })
    }

    /// Loads the store from discovered data files.
    pub fn load(files: &DataFiles) -> LoadResult<Self> {
        let (Some(medications), Some(interactions)) =
            (&files.medications_file, &files.interactions_file)
        else {
            return Err(LoadError::RequiredFileMissing {
                file_type: files.missing_files().join(", "),
                directory: String::new(),
            });
        };

        let records = load_medications(medications)?;
        let graph = load_interaction_graph(interactions)?;
        Self::from_parts(records, graph)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════════════

    /// Returns the medication catalog.
    pub fn catalog(&self) -> &Arc<MedicationCatalog> {
        &self.catalog
    }

    /// Returns the synonym index.
    pub fn index(&self) -> &Arc<SynonymIndex> {
        &self.index
    }

    /// Returns the interaction graph.
    pub fn graph(&self) -> &Arc<InteractionGraph> {
        &self.graph
    }

    /// Lists graph slugs that have no record in the catalog.
    ///
    /// A graph generated against a different dataset still loads; callers
    /// may log these.
    pub fn orphan_graph_slugs(&self) -> Vec<&str> {
        self.graph
            .adjacency
            .keys()
            .map(String::as_str)
            .filter(|slug| self.catalog.get(slug).is_none())
            .collect()
    }
}
