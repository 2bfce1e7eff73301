//! Data file discovery and JSON loading utilities.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use medref_types::MedicationRecord;

use crate::graph::InteractionGraph;
use crate::types::{DataFiles, LoadError, LoadResult};

/// Filename of the medication dataset.
pub const MEDICATIONS_FILE: &str = "medications.json";

/// Accepted filenames of the interaction graph artifact, in preference order.
pub const INTERACTIONS_FILES: &[&str] = &["interactions.json", "ddinter.interactions.json"];

/// Discovers the runtime data files in a directory.
pub fn discover_data_files<P: AsRef<Path>>(path: P) -> LoadResult<DataFiles> {
    let path = path.as_ref();

    if !path.is_dir() {
        return Err(LoadError::DirectoryNotFound {
            path: path.display().to_string(),
        });
    }

    let mut files = DataFiles::new();

    let medications = path.join(MEDICATIONS_FILE);
    if medications.is_file() {
        files.medications_file = Some(medications);
    }

    files.interactions_file = INTERACTIONS_FILES
        .iter()
        .map(|name| path.join(name))
        .find(|candidate| candidate.is_file());

    if !files.has_required_files() {
        return Err(LoadError::RequiredFileMissing {
            file_type: files.missing_files().join(", "),
            directory: path.display().to_string(),
        });
    }

    Ok(files)
}

/// Loads the medication dataset (a JSON array of records).
pub fn load_medications<P: AsRef<Path>>(path: P) -> LoadResult<Vec<MedicationRecord>> {
    let file = open_existing(path.as_ref())?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Loads the interaction graph artifact and verifies it is symmetric.
pub fn load_interaction_graph<P: AsRef<Path>>(path: P) -> LoadResult<InteractionGraph> {
    let file = open_existing(path.as_ref())?;
    let graph: InteractionGraph = serde_json::from_reader(BufReader::new(file))?;
    graph.check_symmetry()?;
    Ok(graph)
}

/// Writes the interaction graph artifact as pretty-printed JSON, creating
/// parent directories as needed.
pub fn write_interaction_graph<P: AsRef<Path>>(path: P, graph: &InteractionGraph) -> LoadResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, graph)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

fn open_existing(path: &Path) -> LoadResult<File> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use medref_types::Severity;

    #[test]
    fn test_discover_prefers_plain_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MEDICATIONS_FILE), "[]").unwrap();
        fs::write(dir.path().join("ddinter.interactions.json"), "{}").unwrap();

        let files = discover_data_files(dir.path()).unwrap();
        assert!(files.interactions_file.unwrap().ends_with("ddinter.interactions.json"));

        fs::write(dir.path().join("interactions.json"), "{}").unwrap();
        let files = discover_data_files(dir.path()).unwrap();
        assert!(files.interactions_file.unwrap().ends_with("interactions.json"));
    }

    #[test]
    fn test_discover_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MEDICATIONS_FILE), "[]").unwrap();

        match discover_data_files(dir.path()) {
            Err(LoadError::RequiredFileMissing { file_type, .. }) => {
                assert_eq!(file_type, "Interactions")
            }
            other => panic!("expected missing file error, got {other:?}"),
        }
    }

    #[test]
    fn test_graph_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("interactions.json");

        let mut graph = InteractionGraph::new();
        graph.names.insert("a".into(), "A".into());
        graph.insert_pair("a", "b", Severity::Major);

        write_interaction_graph(&path, &graph).unwrap();
        let loaded = load_interaction_graph(&path).unwrap();
        assert_eq!(loaded, graph);
    }

    #[test]
    fn test_asymmetric_graph_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("interactions.json");
        fs::write(
            &path,
            r#"{"names": {}, "adjacency": {"a": {"b": "major"}, "b": {"a": "minor"}}}"#,
        )
        .unwrap();

        let err = load_interaction_graph(&path).unwrap_err();
        assert!(matches!(err, LoadError::AsymmetricEdge { .. }));
    }

    #[test]
    fn test_corrupt_json_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MEDICATIONS_FILE);
        fs::write(&path, "[{\"slug\": ").unwrap();

        assert!(matches!(load_medications(&path), Err(LoadError::Json(_))));
        assert!(matches!(
            load_medications(dir.path().join("nope.json")),
            Err(LoadError::FileNotFound { .. })
        ));
    }
}
