//! Generic CSV record parser.
//!
//! Provides a streaming parser for header-validated CSV source files.

use std::fs::File;
use std::io::{BufReader, Read};
use std::marker::PhantomData;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};

use crate::types::{CsvConfig, LoadError, LoadResult};

/// Trait for types that can be parsed from CSV records.
pub trait CsvRecord: Sized {
    /// Expected column names for this record type, in order.
    const EXPECTED_COLUMNS: &'static [&'static str];

    /// Parse a record from a CSV StringRecord.
    fn from_record(record: &StringRecord) -> LoadResult<Self>;
}

/// A streaming parser for CSV files.
///
/// Reads record-by-record; only the current row is held in memory.
pub struct CsvParser<R: Read, T: CsvRecord> {
    reader: Reader<R>,
    records_read: usize,
    _marker: PhantomData<T>,
}

impl<T: CsvRecord> CsvParser<BufReader<File>, T> {
    /// Creates a new parser from a file path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or has invalid headers.
    pub fn from_path<P: AsRef<Path>>(path: P, config: &CsvConfig) -> LoadResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(LoadError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), config)
    }
}

impl<R: Read, T: CsvRecord> CsvParser<R, T> {
    /// Creates a new parser from a reader.
    pub fn from_reader(reader: R, config: &CsvConfig) -> LoadResult<Self> {
        let trim = if config.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        };

        let mut csv_reader = ReaderBuilder::new()
            .delimiter(config.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(trim)
            .from_reader(reader);

        Self::validate_headers(&mut csv_reader)?;

        Ok(Self {
            reader: csv_reader,
            records_read: 0,
            _marker: PhantomData,
        })
    }

    /// Validates that the file starts with the expected column headers.
    fn validate_headers(reader: &mut Reader<R>) -> LoadResult<()> {
        let headers = reader.headers()?;
        let expected = T::EXPECTED_COLUMNS;

        if headers.len() < expected.len() {
            return Err(LoadError::InvalidHeader {
                expected: expected.len(),
                found: headers.len(),
            });
        }

        for (i, expected_col) in expected.iter().enumerate() {
            let found = headers.get(i).unwrap_or("");
            // Handle UTF-8 BOM at start of file
            let found = found.trim_start_matches('\u{feff}');
            if found != *expected_col {
                return Err(LoadError::UnexpectedColumn {
                    position: i,
                    expected: expected_col.to_string(),
                    found: found.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Returns the number of records read so far.
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Parses all records into a Vec, stopping at the first error.
    pub fn parse_all(self) -> LoadResult<Vec<T>> {
        self.collect()
    }
}

impl<R: Read, T: CsvRecord> Iterator for CsvParser<R, T> {
    type Item = LoadResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut record = StringRecord::new();
            match self.reader.read_record(&mut record) {
                Ok(true) => {
                    self.records_read += 1;

                    // Skip empty records
                    if record.is_empty() || record.iter().all(|f| f.trim().is_empty()) {
                        continue;
                    }

                    return Some(T::from_record(&record));
                }
                Ok(false) => return None,
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}
