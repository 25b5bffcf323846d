// src/table.rs
//
// Delimited I/O over the `csv` crate. Columns are matched by header name,
// never by position.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::error::{Error, Result, Stage};
use crate::record::{cleaned_headers, MatchRecord, RawRecord, CANONICAL_COLUMNS};

/* ---------------- Reading ---------------- */

/// Canonical columns absent from `headers`.
pub fn missing_columns(headers: &StringRecord) -> Vec<String> {
    CANONICAL_COLUMNS
        .iter()
        .filter(|c| !headers.iter().any(|h| h.trim() == **c))
        .map(|c| s!(*c))
        .collect()
}

/// Read one raw export (always comma-separated, header row required).
pub fn read_raw<R: Read>(rdr: R, origin: &Path) -> Result<Vec<RawRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(rdr);

    let headers = reader
        .headers()
        .map_err(|e| Error::csv(Stage::Extract, origin, e))?
        .clone();
    let missing = missing_columns(&headers);
    if !missing.is_empty() {
        return Err(Error::MissingColumns { path: origin.to_path_buf(), columns: missing });
    }

    let mut rows = Vec::new();
    for rec in reader.deserialize::<RawRecord>() {
        rows.push(rec.map_err(|e| Error::csv(Stage::Extract, origin, e))?);
    }
    Ok(rows)
}

pub fn read_raw_file(path: &Path) -> Result<Vec<RawRecord>> {
    let file = File::open(path).map_err(|e| Error::io(Stage::Extract, path, e))?;
    read_raw(io::BufReader::new(file), path)
}

/// Read a cleaned table (full table or one player's file).
pub fn read_cleaned<R: Read>(rdr: R, delim: u8, origin: &Path) -> Result<Vec<MatchRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delim)
        .from_reader(rdr);

    let mut rows = Vec::new();
    for rec in reader.deserialize::<MatchRecord>() {
        rows.push(rec.map_err(|e| Error::csv(Stage::Load, origin, e))?);
    }
    Ok(rows)
}

pub fn read_cleaned_file(path: &Path, delim: u8) -> Result<Vec<MatchRecord>> {
    let file = File::open(path).map_err(|e| Error::io(Stage::Load, path, e))?;
    read_cleaned(io::BufReader::new(file), delim, path)
}

/* ---------------- Writing ---------------- */

/// Header row + one line per record, in the order given.
pub fn write_cleaned<W: Write>(w: W, rows: &[MatchRecord], delim: u8) -> csv::Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .delimiter(delim)
        .from_writer(w);

    // Written by hand so an empty table still gets its header row.
    writer.write_record(cleaned_headers())?;
    for r in rows {
        writer.serialize(r)?;
    }
    writer.flush()?;
    Ok(())
}
