//! fastadb: protein FASTA parsing with pluggable header parsing
//!
//! # Overview
//!
//! fastadb parses, represents, and serializes FASTA-formatted protein
//! sequence records, built around the header-format ambiguity of real-world
//! proteomics data: the same file may carry UniProt-style headers, bare
//! accessions, or site-local conventions. Header interpretation is therefore
//! a pluggable strategy ([`HeaderParser`]), raw headers are always preserved
//! for lossless round trips, and imported records are indexed by identifier
//! in a [`ProteinDatabase`].
//!
//! ## Key properties
//!
//! - **Never fails on messy input**: structural parsing and the built-in
//!   header parsers degrade gracefully instead of rejecting odd entries.
//! - **Lossless round trips**: the raw header is stored verbatim, and the
//!   default [`HeaderFormat::Verbatim`] re-emits it unchanged.
//! - **Fail-fast merging**: importing a duplicate identifier is an error by
//!   default, not a silent overwrite; imports are all-or-nothing.
//! - **Transparent gzip**: `.gz` sources and destinations are detected from
//!   the file extension.
//!
//! ## Quick Start
//!
//! ```no_run
//! use fastadb::{HeaderFormat, HeaderParser, ProteinDatabase};
//!
//! # fn main() -> fastadb::Result<()> {
//! let mut db = ProteinDatabase::new();
//! db.add_fasta("human.fasta.gz", &HeaderParser::Uniprot)?;
//!
//! let ulk1 = db.get("O75385")?;
//! println!("{} -> {:?}", ulk1.identifier, ulk1.field("gene_name"));
//!
//! db.to_fasta("export.fasta", &HeaderFormat::Verbatim, 60)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`header`]: header parsing strategies, formatting, and the parser
//!   registry
//! - [`io`]: streaming FASTA parser and writer, gzip handling
//! - [`db`]: the identifier-indexed protein database
//! - [`error`]: error types
//! - [`types`]: record types

#![warn(missing_docs)]

pub mod db;
pub mod error;
pub mod header;
pub mod io;
pub mod types;

// Re-export commonly used types
pub use db::{ImportOptions, ProteinDatabase};
pub use error::{FastaDbError, Result};
pub use header::{HeaderFormat, HeaderParser, HeaderParserRegistry, ParsedHeader};
pub use io::{FastaStream, FastaWriter, DEFAULT_LINE_WIDTH};
pub use types::{FastaRecord, HeaderFields, RawRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
