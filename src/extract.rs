// src/extract.rs
//
// Raw Match Extractor: resolve the input (one path or a wildcard pattern),
// read every matching export and concatenate the rows in enumeration order.

use std::path::{Path, PathBuf};

use crate::config::options::InputSource;
use crate::core::wildcard;
use crate::error::{Error, Result, Stage};
use crate::record::RawRecord;

/// Concatenated raw rows plus where they came from.
#[derive(Clone, Debug, Default)]
pub struct RawTable {
    pub sources: Vec<PathBuf>,
    /// Index into `rows` of each source's first row
    pub starts: Vec<usize>,
    pub rows: Vec<RawRecord>,
}

impl RawTable {
    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// Source file and 1-based line (header is line 1) of row `i`.
    pub fn locate(&self, i: usize) -> (Option<&Path>, usize) {
        // Last source starting at or before `i`; empty files share the next start
        match self.starts.partition_point(|&s| s <= i).checked_sub(1) {
            Some(f) => (self.sources.get(f).map(PathBuf::as_path), i - self.starts[f] + 2),
            None => (None, i + 2),
        }
    }
}

impl From<Vec<RawRecord>> for RawTable {
    fn from(rows: Vec<RawRecord>) -> Self {
        Self { rows, ..Default::default() }
    }
}

pub fn resolve(input: &InputSource) -> Result<Vec<PathBuf>> {
    match input {
        InputSource::Path(p) => {
            if !p.is_file() {
                return Err(Error::io(
                    Stage::Extract,
                    p,
                    std::io::Error::new(std::io::ErrorKind::NotFound, "input file not found"),
                ));
            }
            Ok(vec![p.clone()])
        }
        InputSource::Pattern(pat) => {
            let dir = std::path::Path::new(pat)
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            let paths = wildcard::expand(pat).map_err(|e| Error::io(Stage::Extract, dir, e))?;
            if paths.is_empty() {
                return Err(Error::NoInput { pattern: pat.clone() });
            }
            Ok(paths)
        }
    }
}

pub fn extract(input: &InputSource) -> Result<RawTable> {
    let sources = resolve(input)?;
    let mut rows = Vec::new();
    let mut starts = Vec::with_capacity(sources.len());

    for path in &sources {
        let mut part = crate::table::read_raw_file(path)?;
        logf!("Extract: {} row(s) from {}", part.len(), path.display());
        starts.push(rows.len());
        rows.append(&mut part);
    }

    logf!("Extract: {} row(s) total from {} file(s)", rows.len(), sources.len());
    Ok(RawTable { sources, starts, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_map_back_to_file_and_line() {
        let table = RawTable {
            sources: vec![PathBuf::from("a.csv"), PathBuf::from("empty.csv"), PathBuf::from("b.csv")],
            starts: vec![0, 3, 3],
            rows: vec![RawRecord::default(); 5],
        };
        assert_eq!(table.locate(0), (Some(Path::new("a.csv")), 2));
        assert_eq!(table.locate(2), (Some(Path::new("a.csv")), 4));
        assert_eq!(table.locate(3), (Some(Path::new("b.csv")), 2));
        assert_eq!(table.locate(4), (Some(Path::new("b.csv")), 3));

        let in_memory = RawTable::from(vec![RawRecord::default(); 2]);
        assert_eq!(in_memory.locate(1), (None, 3));
    }
}
