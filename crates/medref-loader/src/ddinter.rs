//! DDInter interaction CSV support.
//!
//! DDInter publishes one CSV per ATC category, named
//! `ddinter_downloads_code_<CODE>.csv`, with the columns
//! `DDInterID_A, Drug_A, DDInterID_B, Drug_B, Level`.

use std::fs;
use std::path::Path;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use csv::StringRecord;

use crate::parser::{CsvParser, CsvRecord};
use crate::types::{CsvConfig, DdinterFile, LoadError, LoadResult};

/// Filename prefix of DDInter download files.
pub const DDINTER_FILE_PREFIX: &str = "ddinter_downloads_code_";

/// Expected columns in a DDInter file.
const DDINTER_COLUMNS: &[&str] = &["DDInterID_A", "Drug_A", "DDInterID_B", "Drug_B", "Level"];

/// One raw interaction row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdinterRow {
    /// DDInter identifier of the first drug.
    pub id_a: String,
    /// Name of the first drug.
    pub drug_a: String,
    /// DDInter identifier of the second drug.
    pub id_b: String,
    /// Name of the second drug.
    pub drug_b: String,
    /// Raw severity label ("Major", "Moderate", "Minor", "Unknown").
    pub level: String,
}

impl CsvRecord for DdinterRow {
    const EXPECTED_COLUMNS: &'static [&'static str] = DDINTER_COLUMNS;

    fn from_record(record: &StringRecord) -> LoadResult<Self> {
        Ok(DdinterRow {
            id_a: record.get(0).unwrap_or("").to_string(),
            drug_a: record.get(1).unwrap_or("").to_string(),
            id_b: record.get(2).unwrap_or("").to_string(),
            drug_b: record.get(3).unwrap_or("").to_string(),
            level: record.get(4).unwrap_or("").to_string(),
        })
    }
}

/// Discovers DDInter download files in a directory, sorted by code.
pub fn discover_ddinter_files<P: AsRef<Path>>(path: P) -> LoadResult<Vec<DdinterFile>> {
    let path = path.as_ref();

    if !path.is_dir() {
        return Err(LoadError::DirectoryNotFound {
            path: path.display().to_string(),
        });
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let filename = entry.file_name();
        let filename_str = filename.to_string_lossy();

        if let Some(code) = extract_download_code(&filename_str) {
            files.push(DdinterFile {
                code,
                path: entry.path(),
            });
        }
    }

    if files.is_empty() {
        return Err(LoadError::RequiredFileMissing {
            file_type: format!("{DDINTER_FILE_PREFIX}*.csv"),
            directory: path.display().to_string(),
        });
    }

    files.sort_by(|a, b| a.code.cmp(&b.code));
    Ok(files)
}

/// Extracts the category code from a DDInter filename.
///
/// `ddinter_downloads_code_A.csv` yields `A`.
fn extract_download_code(filename: &str) -> Option<String> {
    let code = filename
        .strip_prefix(DDINTER_FILE_PREFIX)?
        .strip_suffix(".csv")?;

    if !code.is_empty() && code.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(code.to_string())
    } else {
        None
    }
}

/// Parses one DDInter file.
pub fn load_ddinter_file<P: AsRef<Path>>(path: P) -> LoadResult<Vec<DdinterRow>> {
    CsvParser::<_, DdinterRow>::from_path(path, &CsvConfig::default())?.parse_all()
}

/// Parses every file in order, returning rows grouped per file.
pub fn load_ddinter_rows(files: &[DdinterFile]) -> LoadResult<Vec<(String, Vec<DdinterRow>)>> {
    files
        .iter()
        .map(|file| Ok((file.code.clone(), load_ddinter_file(&file.path)?)))
        .collect()
}

/// Parses every file concurrently, returning rows grouped per file in the
/// same order as `files`.
#[cfg(feature = "parallel")]
pub fn load_ddinter_rows_parallel(
    files: &[DdinterFile],
) -> LoadResult<Vec<(String, Vec<DdinterRow>)>> {
    files
        .par_iter()
        .map(|file| Ok((file.code.clone(), load_ddinter_file(&file.path)?)))
        .collect()
}
