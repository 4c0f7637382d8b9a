use std::io::BufRead;

use thiserror::Error;

use crate::error::EventError;
use crate::triples::builder::TripleColumns;
use crate::triples::Triple;
use crate::types::Direction;

/// Errors while reading a triple table.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("I/O error while reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("missing column '{column}' in header (found: {found:?})")]
    MissingColumn { column: String, found: Vec<String> },

    #[error("line {line_no}: {problem}")]
    MalformedLine { line_no: usize, problem: String },

    #[error("line {line_no}: {source}")]
    Event {
        line_no: usize,
        #[source]
        source: EventError,
    },
}

/// Low-level streaming parser for delimited triple tables.
///
/// The first non-blank, non-comment line is the header; columns are located
/// by name, so extra columns (e.g. a leading index) are ignored.
///
/// Most users should go through [`crate::triples::TripleTableBuilder`].
///
/// ```
/// use std::io::Cursor;
/// use splice_events::triples::{TripleColumns, TripleReader};
///
/// let tsv = "exon\tdirection\tjunction\n\
///            exon:chr1:150-175:+\tupstream\tjunction:chr1:176-224:+\n";
/// let rdr = TripleReader::new(Cursor::new(tsv), TripleColumns::default(), '\t');
/// let triples: Vec<_> = rdr.records().collect::<Result<_, _>>().unwrap();
/// assert_eq!(triples.len(), 1);
/// ```
pub struct TripleReader<R: BufRead> {
    reader: R,
    columns: TripleColumns,
    delimiter: char,
    buf: String,
    line_no: usize,
}

impl<R: BufRead> TripleReader<R> {
    pub fn new(reader: R, columns: TripleColumns, delimiter: char) -> Self {
        Self {
            reader,
            columns,
            delimiter,
            buf: String::new(),
            line_no: 0,
        }
    }

    /// Iterator over parsed triples.
    ///
    /// - Skips blank lines
    /// - Skips comment lines starting with '#'
    pub fn records(mut self) -> impl Iterator<Item = Result<Triple, ParseError>> {
        let mut positions: Option<[usize; 3]> = None;
        let mut failed = false;

        std::iter::from_fn(move || loop {
            if failed {
                return None;
            }

            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => self.line_no += 1,
                Err(e) => {
                    failed = true;
                    return Some(Err(ParseError::Io {
                        path: "<reader>".to_string(),
                        source: e,
                    }));
                }
            }

            let line = self.buf.trim_end_matches(&['\n', '\r'][..]);
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let Some(pos) = positions else {
                match self.columns.locate(line, self.delimiter) {
                    Ok(p) => {
                        positions = Some(p);
                        continue;
                    }
                    Err(e) => {
                        failed = true;
                        return Some(Err(e));
                    }
                }
            };

            return Some(parse_triple_line(line, self.line_no, pos, self.delimiter));
        })
    }
}

/// Parse one data line given the header positions of exon/direction/junction.
pub fn parse_triple_line(
    line: &str,
    line_no: usize,
    [exon_at, direction_at, junction_at]: [usize; 3],
    delimiter: char,
) -> Result<Triple, ParseError> {
    let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();

    let exon = field(&fields, exon_at, "exon", line_no)?;
    let direction: Direction = field(&fields, direction_at, "direction", line_no)?
        .parse()
        .map_err(|source| ParseError::Event { line_no, source })?;
    let junction = field(&fields, junction_at, "junction", line_no)?;

    Ok(Triple::new(exon, direction, junction))
}

fn field<'a>(
    fields: &[&'a str],
    at: usize,
    name: &str,
    line_no: usize,
) -> Result<&'a str, ParseError> {
    match fields.get(at) {
        Some(v) if !v.is_empty() => Ok(*v),
        _ => Err(ParseError::MalformedLine {
            line_no,
            problem: format!("missing value for '{name}' ({} fields)", fields.len()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read(data: &str) -> Result<Vec<Triple>, ParseError> {
        TripleReader::new(Cursor::new(data.as_bytes()), TripleColumns::default(), '\t')
            .records()
            .collect()
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let data = "\
# produced by an upstream step
exon\tdirection\tjunction

exon:chr1:150-175:+\tupstream\tjunction:chr1:176-224:+
exon:chr1:225-250:+\tdownstream\tjunction:chr1:176-224:+
";
        let triples = read(data).unwrap();
        assert_eq!(triples.len(), 2);
        assert_eq!(triples[1].direction, Direction::Downstream);
        assert_eq!(triples[1].junction, "junction:chr1:176-224:+");
    }

    #[test]
    fn header_order_and_extra_columns_are_honoured() {
        let data = "\
idx\tjunction\texon\tdirection
0\tjunction:chr1:176-224:+\texon:chr1:150-175:+\tupstream
";
        let triples = read(data).unwrap();
        assert_eq!(triples[0].exon, "exon:chr1:150-175:+");
        assert_eq!(triples[0].direction, Direction::Upstream);
    }

    #[test]
    fn missing_column_is_reported() {
        let err = read("exon\tjunction\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingColumn { ref column, .. } if column == "direction"
        ));
    }

    #[test]
    fn unknown_direction_carries_line_number() {
        let data = "exon\tdirection\tjunction\ne1\tsideways\tj1\n";
        let err = read(data).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Event { line_no: 2, source: EventError::UnknownDirection(_) }
        ));
    }

    #[test]
    fn short_line_is_malformed() {
        let data = "exon\tdirection\tjunction\ne1\tupstream\n";
        assert!(matches!(read(data).unwrap_err(), ParseError::MalformedLine { line_no: 2, .. }));
    }
}
