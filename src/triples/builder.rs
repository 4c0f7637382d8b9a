use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::triples::io::{ParseError, TripleReader};
use crate::triples::TripleTable;

/// Header names of the three triple columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripleColumns {
    pub exon: String,
    pub direction: String,
    pub junction: String,
}

impl Default for TripleColumns {
    fn default() -> Self {
        Self {
            exon: "exon".into(),
            direction: "direction".into(),
            junction: "junction".into(),
        }
    }
}

impl TripleColumns {
    /// Positions of exon, direction and junction within a header line.
    pub fn locate(&self, header: &str, delimiter: char) -> Result<[usize; 3], ParseError> {
        let found: Vec<&str> = header.split(delimiter).map(str::trim).collect();
        let position = |name: &str| {
            found
                .iter()
                .position(|h| *h == name)
                .ok_or_else(|| ParseError::MissingColumn {
                    column: name.to_string(),
                    found: found.iter().map(|s| s.to_string()).collect(),
                })
        };
        Ok([
            position(self.exon.as_str())?,
            position(self.direction.as_str())?,
            position(self.junction.as_str())?,
        ])
    }
}

/// High-level builder for reading a `TripleTable` from delimited text.
///
/// - parses the whole table (optionally gzipped)
/// - configurable column names and delimiter
/// - deduplicates triples while keeping first-seen order
#[derive(Debug, Clone)]
pub struct TripleTableBuilder {
    pub columns: TripleColumns,
    pub delimiter: char,
}

impl Default for TripleTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TripleTableBuilder {
    /// Tab-separated, columns `exon`, `direction`, `junction`.
    pub fn new() -> Self {
        Self {
            columns: TripleColumns::default(),
            delimiter: '\t',
        }
    }

    pub fn exon_column(mut self, name: &str) -> Self {
        self.columns.exon = name.to_string();
        self
    }

    pub fn direction_column(mut self, name: &str) -> Self {
        self.columns.direction = name.to_string();
        self
    }

    pub fn junction_column(mut self, name: &str) -> Self {
        self.columns.junction = name.to_string();
        self
    }

    /// e.g. `','` for csv exports.
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Build from anything implementing `BufRead`.
    pub fn build_from_reader<R: BufRead>(&self, reader: R) -> Result<TripleTable, ParseError> {
        TripleReader::new(reader, self.columns.clone(), self.delimiter)
            .records()
            .collect()
    }

    /// Build from a file path; `.gz` files are decompressed on the fly.
    pub fn build_from_path<P: AsRef<Path>>(&self, path: P) -> Result<TripleTable, ParseError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| ParseError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        let is_gz = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("gz"))
            .unwrap_or(false);

        if is_gz {
            let decoder = flate2::read::GzDecoder::new(file);
            self.build_from_reader(BufReader::new(decoder))
        } else {
            self.build_from_reader(BufReader::new(file))
        }
    }
}
