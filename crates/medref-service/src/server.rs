//! Shared handler state.

use std::sync::Arc;

use medref_loader::{
    InteractionProvider, MedicationCatalog, ReferenceStore, ReportPolicy, StaticGraphProvider,
    SynonymIndex,
};

/// Medication reference server state.
///
/// Cheap to clone; every handler gets its own copy of the `Arc`s.
#[derive(Clone)]
pub struct MedrefServer {
    catalog: Arc<MedicationCatalog>,
    index: Arc<SynonymIndex>,
    provider: Arc<dyn InteractionProvider>,
    graph_nodes: usize,
}

impl MedrefServer {
    /// Creates a server over `store`, checking interactions against its
    /// static graph with the given policy.
    pub fn new(store: ReferenceStore, policy: ReportPolicy) -> Self {
        let provider = StaticGraphProvider::new(Arc::clone(store.graph()), policy);
        let graph_nodes = store.graph().node_count();

        Self {
            catalog: Arc::clone(store.catalog()),
            index: Arc::clone(store.index()),
            provider: Arc::new(provider),
            graph_nodes,
        }
    }

    /// Creates a server with a custom interaction provider.
    pub fn with_provider(store: &ReferenceStore, provider: Arc<dyn InteractionProvider>) -> Self {
        Self {
            catalog: Arc::clone(store.catalog()),
            index: Arc::clone(store.index()),
            provider,
            graph_nodes: store.graph().node_count(),
        }
    }

    /// Returns the medication catalog.
    pub fn catalog(&self) -> &MedicationCatalog {
        &self.catalog
    }

    /// Returns the synonym index.
    pub fn index(&self) -> &SynonymIndex {
        &self.index
    }

    /// Returns the interaction provider.
    pub fn provider(&self) -> &Arc<dyn InteractionProvider> {
        &self.provider
    }

    /// Returns the number of medications present in the interaction graph.
    pub fn graph_nodes(&self) -> usize {
        self.graph_nodes
    }
}

impl std::fmt::Debug for MedrefServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MedrefServer")
            .field("medications", &self.catalog.len())
            .field("synonyms", &self.index.len())
            .field("graph_nodes", &self.graph_nodes)
            .field("provider", &self.provider.name())
            .finish()
    }
}
