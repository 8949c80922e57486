//! Protein database: identifier-indexed storage for FASTA records
//!
//! [`ProteinDatabase`] owns the mapping from identifier to [`FastaRecord`].
//! Records enter through import operations ([`add_fasta`], [`add_reader`])
//! that drive the streaming parser and the chosen [`HeaderParser`], and
//! leave through export operations ([`to_fasta`], [`to_writer`]) that drive
//! the [`FastaWriter`]. Insertion order is preserved for iteration and
//! export.
//!
//! # Collision policy
//!
//! Imports are all-or-nothing. The whole source is parsed and checked
//! against the existing index (and against itself) before anything is
//! inserted: the first duplicate identifier fails the import with
//! [`FastaDbError::DuplicateIdentifier`] and leaves the database exactly as
//! it was. Silent merges would hide data-integrity problems in proteomics
//! workflows, so overwriting is only available as the explicit opt-in
//! [`ImportOptions::overwrite`].
//!
//! [`add_fasta`]: ProteinDatabase::add_fasta
//! [`add_reader`]: ProteinDatabase::add_reader
//! [`to_fasta`]: ProteinDatabase::to_fasta
//! [`to_writer`]: ProteinDatabase::to_writer

use crate::error::{FastaDbError, Result};
use crate::header::{HeaderFormat, HeaderParser};
use crate::io::{DataSource, FastaStream, FastaWriter};
use crate::types::FastaRecord;
use log::warn;
use std::collections::{HashMap, HashSet};
use std::io::{BufRead, Write};
use std::path::Path;

/// Source name used for records inserted directly rather than imported
const DIRECT_SOURCE: &str = "<direct>";

/// Options controlling import behavior
///
/// The default is strict: collisions fail the import, and custom-parser
/// failures fail the import.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    /// Replace existing entries on identifier collision instead of failing.
    /// Replaced entries keep their original insertion position.
    pub overwrite: bool,
    /// Skip entries whose header a custom parser rejects instead of failing.
    /// Skipped headers are recorded per source and reported via `log`.
    pub skip_invalid: bool,
}

/// A database of protein entries derived from FASTA files
///
/// # Example
///
/// ```no_run
/// use fastadb::{HeaderFormat, HeaderParser, ProteinDatabase};
///
/// # fn main() -> fastadb::Result<()> {
/// let mut db = ProteinDatabase::new();
/// db.add_fasta("human.fasta", &HeaderParser::Uniprot)?;
/// db.add_fasta("yeast.fasta.gz", &HeaderParser::Uniprot)?;
///
/// let record = db.get("O75385")?;
/// println!("{}: {} residues", record.identifier, record.sequence.len());
///
/// db.to_fasta("merged.fasta", &HeaderFormat::Verbatim, 60)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ProteinDatabase {
    /// Records in insertion order
    records: Vec<FastaRecord>,
    /// Identifier to position in `records`
    index: HashMap<String, usize>,
    /// Names of the FASTA sources imported so far
    imported_sources: Vec<String>,
    /// Per-source headers skipped under `skip_invalid`
    skipped_headers: HashMap<String, Vec<String>>,
}

impl ProteinDatabase {
    /// Create an empty database
    pub fn new() -> Self {
        Self::default()
    }

    /// Import every record from a FASTA file with default (strict) options
    ///
    /// Returns the number of records added. The source name recorded for
    /// diagnostics is the file name component of the path.
    pub fn add_fasta<P: AsRef<Path>>(&mut self, path: P, parser: &HeaderParser) -> Result<usize> {
        self.add_fasta_with(path, parser, ImportOptions::default())
    }

    /// Import every record from a FASTA file
    pub fn add_fasta_with<P: AsRef<Path>>(
        &mut self,
        path: P,
        parser: &HeaderParser,
        options: ImportOptions,
    ) -> Result<usize> {
        let path = path.as_ref();
        let source = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("<unnamed>")
            .to_string();
        let reader = DataSource::from_path(path).open()?;
        self.add_reader(reader, &source, parser, options)
    }

    /// Import every record from an in-memory or already-open FASTA source
    ///
    /// `source` names the origin for duplicate diagnostics and provenance
    /// tracking. The import is all-or-nothing: on any error the database is
    /// left unchanged.
    pub fn add_reader<R: BufRead>(
        &mut self,
        reader: R,
        source: &str,
        parser: &HeaderParser,
        options: ImportOptions,
    ) -> Result<usize> {
        let mut incoming: Vec<FastaRecord> = Vec::new();
        let mut skipped: Vec<String> = Vec::new();

        for raw in FastaStream::from_reader(reader) {
            let raw = raw?;
            let parsed = match parser.parse(&raw.header) {
                Ok(parsed) => parsed,
                Err(_) if options.skip_invalid => {
                    skipped.push(raw.header);
                    continue;
                }
                Err(e) => return Err(e),
            };
            incoming.push(FastaRecord::new(
                parsed.identifier,
                raw.header,
                raw.sequence,
                parsed.fields,
            ));
        }

        if !options.overwrite {
            let mut batch_identifiers: HashSet<&str> = HashSet::new();
            for record in &incoming {
                let collides = self.index.contains_key(&record.identifier)
                    || !batch_identifiers.insert(record.identifier.as_str());
                if collides {
                    return Err(FastaDbError::DuplicateIdentifier {
                        identifier: record.identifier.clone(),
                        source: source.to_string(),
                    });
                }
            }
        }

        let added = incoming.len();
        for record in incoming {
            self.insert(record);
        }

        self.imported_sources.push(source.to_string());
        if !skipped.is_empty() {
            warn!(
                "skipped {}/{} entries from '{}': headers rejected by the header parser",
                skipped.len(),
                skipped.len() + added,
                source
            );
        }
        self.skipped_headers.insert(source.to_string(), skipped);

        Ok(added)
    }

    /// Add a single record, failing on identifier collision
    pub fn add_record(&mut self, record: FastaRecord) -> Result<()> {
        self.add_record_with(record, false)
    }

    /// Add a single record, optionally replacing an existing entry
    pub fn add_record_with(&mut self, record: FastaRecord, overwrite: bool) -> Result<()> {
        if !overwrite && self.index.contains_key(&record.identifier) {
            return Err(FastaDbError::DuplicateIdentifier {
                identifier: record.identifier,
                source: DIRECT_SOURCE.to_string(),
            });
        }
        self.insert(record);
        Ok(())
    }

    /// Insert or replace, keeping the original position on replacement
    fn insert(&mut self, record: FastaRecord) {
        match self.index.get(&record.identifier) {
            Some(&position) => self.records[position] = record,
            None => {
                self.index
                    .insert(record.identifier.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    /// Exact-match lookup by identifier
    pub fn get(&self, identifier: &str) -> Result<&FastaRecord> {
        self.index
            .get(identifier)
            .map(|&position| &self.records[position])
            .ok_or_else(|| FastaDbError::IdentifierNotFound(identifier.to_string()))
    }

    /// Non-failing existence check
    pub fn contains(&self, identifier: &str) -> bool {
        self.index.contains_key(identifier)
    }

    /// Remove and return the entry for an identifier
    ///
    /// The relative order of the remaining entries is preserved.
    pub fn remove(&mut self, identifier: &str) -> Result<FastaRecord> {
        let position = self
            .index
            .remove(identifier)
            .ok_or_else(|| FastaDbError::IdentifierNotFound(identifier.to_string()))?;
        let record = self.records.remove(position);
        for indexed_position in self.index.values_mut() {
            if *indexed_position > position {
                *indexed_position -= 1;
            }
        }
        Ok(record)
    }

    /// Number of records in the database
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check whether the database holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &FastaRecord> {
        self.records.iter()
    }

    /// Iterate over identifiers in insertion order
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|record| record.identifier.as_str())
    }

    /// Names of the FASTA sources imported so far, in import order
    pub fn imported_sources(&self) -> &[String] {
        &self.imported_sources
    }

    /// Headers skipped while importing a given source under `skip_invalid`
    pub fn skipped_headers(&self, source: &str) -> &[String] {
        self.skipped_headers
            .get(source)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Export every record to a FASTA file, in insertion order
    ///
    /// Gzip compression is auto-detected from the file extension. A
    /// `line_width` of `0` disables sequence wrapping.
    pub fn to_fasta<P: AsRef<Path>>(
        &self,
        path: P,
        format: &HeaderFormat,
        line_width: usize,
    ) -> Result<()> {
        let mut writer = FastaWriter::create(path)?.with_line_width(line_width);
        writer.write_all_records(self.records.iter(), format)?;
        writer.finish()
    }

    /// Export every record to any `Write` destination, in insertion order
    pub fn to_writer<W: Write>(
        &self,
        writer: W,
        format: &HeaderFormat,
        line_width: usize,
    ) -> Result<()> {
        let mut fasta_writer = FastaWriter::from_writer(writer).with_line_width(line_width);
        fasta_writer.write_all_records(self.records.iter(), format)?;
        fasta_writer.flush()
    }
}
