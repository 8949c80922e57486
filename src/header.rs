//! Header parsing and formatting strategies
//!
//! FASTA header lines are free-form text, so there is no single correct way
//! to derive a record identifier from them. This module provides a pluggable
//! strategy for that step:
//!
//! - [`HeaderParser::Passthrough`]: the whole trimmed header is the
//!   identifier, no fields are extracted. Cannot fail.
//! - [`HeaderParser::Uniprot`]: parses the canonical UniProt grammar
//!   `db|accession|entry_name description OS=... OX=... GN=... PE=... SV=...`
//!   with best-effort degradation on partial matches. Cannot fail either.
//! - [`HeaderParser::Custom`]: any user-supplied function honoring the same
//!   contract. Custom parsers may fail; their errors propagate to the caller
//!   of the import operation.
//!
//! The never-fails guarantee on the built-in parsers is a correctness
//! invariant, not an accident: real-world FASTA files are messy, and a
//! parser that rejects a header it does not fully understand would make
//! whole databases unreadable over one odd entry.
//!
//! The write direction is covered by [`HeaderFormat`], and name-based parser
//! selection by [`HeaderParserRegistry`].
//!
//! # Example
//!
//! ```
//! use fastadb::HeaderParser;
//!
//! let parsed = HeaderParser::Uniprot
//!     .parse("sp|O75385|ULK1_HUMAN Serine/threonine-protein kinase ULK1 OS=Homo sapiens OX=9606 GN=ULK1 PE=1 SV=2")
//!     .unwrap();
//!
//! assert_eq!(parsed.identifier, "O75385");
//! assert_eq!(parsed.field("gene_name"), Some("ULK1"));
//! assert_eq!(parsed.field("organism_name"), Some("Homo sapiens"));
//! ```

use crate::error::{FastaDbError, Result};
use crate::types::{FastaRecord, HeaderFields};
use std::collections::HashMap;

/// Recognized UniProt `KEY=` tags and their descriptive field names
const UNIPROT_TAGS: [(&str, &str); 5] = [
    ("OS", "organism_name"),
    ("OX", "organism_id"),
    ("GN", "gene_name"),
    ("PE", "protein_existence"),
    ("SV", "sequence_version"),
];

/// A parsed FASTA header: the derived identifier plus extracted fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHeader {
    /// The unique identifier derived from the header
    pub identifier: String,
    /// Extracted header fields in extraction order; may be empty
    pub fields: HeaderFields,
}

impl ParsedHeader {
    /// Look up an extracted field by name
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Strategy for deriving an identifier and structured fields from a raw
/// FASTA header line
///
/// The built-in variants never return an error; see the module docs for why
/// that guarantee matters.
pub enum HeaderParser {
    /// Whole trimmed header as identifier, no fields. Infallible by
    /// construction: there is no conditional logic that can reject input.
    Passthrough,
    /// UniProt header grammar with graceful degradation on partial matches
    Uniprot,
    /// User-supplied parser honoring the same contract. The parsing pipeline
    /// treats it opaquely; its errors propagate to the import caller.
    Custom(Box<dyn Fn(&str) -> Result<ParsedHeader> + Send + Sync>),
}

impl std::fmt::Debug for HeaderParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passthrough => write!(f, "Passthrough"),
            Self::Uniprot => write!(f, "Uniprot"),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl HeaderParser {
    /// Parse a raw header line (without the leading '>') into a
    /// [`ParsedHeader`]
    ///
    /// `Passthrough` and `Uniprot` always return `Ok`. Only `Custom`
    /// parsers can fail.
    pub fn parse(&self, header: &str) -> Result<ParsedHeader> {
        match self {
            Self::Passthrough => Ok(parse_passthrough(header)),
            Self::Uniprot => Ok(parse_uniprot(header)),
            Self::Custom(parser) => parser(header),
        }
    }
}

/// Passthrough parsing: trimmed header as identifier, empty fields
fn parse_passthrough(header: &str) -> ParsedHeader {
    ParsedHeader {
        identifier: header.trim().to_string(),
        fields: Vec::new(),
    }
}

/// UniProt header parsing with best-effort extraction
///
/// The pipe-delimited prefix `db|accession|entry_name` yields the accession
/// as identifier. Text between the entry name and the first recognized tag
/// becomes the `description` field; each recognized `KEY=` tag value runs
/// until the next recognized tag or end of line. A header without the pipe
/// prefix falls back to passthrough behavior for the identifier while still
/// extracting any tags that are present.
fn parse_uniprot(header: &str) -> ParsedHeader {
    let trimmed = header.trim();
    let mut fields: HeaderFields = Vec::new();

    let (first_token, remainder) = match trimmed.split_once(char::is_whitespace) {
        Some((token, rest)) => (token, rest.trim_start()),
        None => (trimmed, ""),
    };

    let prefix: Vec<&str> = first_token.split('|').collect();
    let matched_prefix = prefix.len() == 3 && prefix.iter().all(|part| !part.is_empty());

    let (identifier, tagged_text) = if matched_prefix {
        fields.push(("db".to_string(), prefix[0].to_string()));
        fields.push(("accession".to_string(), prefix[1].to_string()));
        fields.push(("entry_name".to_string(), prefix[2].to_string()));
        (prefix[1].to_string(), remainder)
    } else {
        // No recognizable prefix: passthrough identifier, but still pick up
        // any tags found anywhere in the header.
        (trimmed.to_string(), trimmed)
    };

    let mut tag_starts = find_tag_starts(tagged_text);
    tag_starts.sort_by_key(|&(start, _)| start);

    if matched_prefix {
        let description_end = tag_starts
            .first()
            .map_or(tagged_text.len(), |&(start, _)| start);
        let description = tagged_text[..description_end].trim();
        if !description.is_empty() {
            fields.push(("description".to_string(), description.to_string()));
        }
    }

    for (slot, &(start, tag_index)) in tag_starts.iter().enumerate() {
        let (tag, name) = UNIPROT_TAGS[tag_index];
        let end = tag_starts
            .get(slot + 1)
            .map_or(tagged_text.len(), |&(next_start, _)| next_start);
        let value = tagged_text[start + tag.len() + 1..end].trim();
        fields.push((name.to_string(), value.to_string()));
    }

    ParsedHeader { identifier, fields }
}

/// Locate the first occurrence of each recognized `KEY=` tag
///
/// A tag only counts when it sits at the start of the text or after
/// whitespace, so a description like "PROTEASE=like" cannot shadow a real
/// tag. Returns `(byte offset, index into UNIPROT_TAGS)` pairs.
fn find_tag_starts(text: &str) -> Vec<(usize, usize)> {
    let mut starts = Vec::new();
    for (tag_index, (tag, _)) in UNIPROT_TAGS.iter().enumerate() {
        let pattern = format!("{tag}=");
        let found = text.match_indices(&pattern).find(|&(pos, _)| {
            pos == 0 || text.as_bytes()[pos - 1].is_ascii_whitespace()
        });
        if let Some((pos, _)) = found {
            starts.push((pos, tag_index));
        }
    }
    starts
}

/// Strategy for generating a header string when serializing records
///
/// The default [`HeaderFormat::Verbatim`] re-emits the stored raw header,
/// which guarantees a lossless round trip. The formatter output must not
/// contain line terminators; the writer only wraps sequences.
pub enum HeaderFormat {
    /// Re-emit `record.header` unchanged (lossless round trip)
    Verbatim,
    /// Rebuild a UniProt-style header from the record's parsed fields,
    /// falling back to the verbatim header when the pipe-prefix fields
    /// (`db`, `accession`, `entry_name`) are absent
    Uniprot,
    /// User-supplied formatter
    Custom(Box<dyn Fn(&FastaRecord) -> String + Send + Sync>),
}

impl std::fmt::Debug for HeaderFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Verbatim => write!(f, "Verbatim"),
            Self::Uniprot => write!(f, "Uniprot"),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl Default for HeaderFormat {
    fn default() -> Self {
        Self::Verbatim
    }
}

impl HeaderFormat {
    /// Generate the header string for one record, without the leading '>'
    pub fn format(&self, record: &FastaRecord) -> String {
        match self {
            Self::Verbatim => record.header.clone(),
            Self::Uniprot => format_uniprot(record),
            Self::Custom(formatter) => formatter(record),
        }
    }
}

/// Reassemble a UniProt header from parsed fields
fn format_uniprot(record: &FastaRecord) -> String {
    let (db, accession, entry_name) = match (
        record.field("db"),
        record.field("accession"),
        record.field("entry_name"),
    ) {
        (Some(db), Some(accession), Some(entry_name)) => (db, accession, entry_name),
        // Not parsed as UniProt, nothing to rebuild from
        _ => return record.header.clone(),
    };

    let mut header = format!("{db}|{accession}|{entry_name}");
    if let Some(description) = record.field("description") {
        header.push(' ');
        header.push_str(description);
    }
    for (tag, name) in UNIPROT_TAGS {
        if let Some(value) = record.field(name) {
            header.push(' ');
            header.push_str(tag);
            header.push('=');
            header.push_str(value);
        }
    }
    header
}

/// Name-based lookup of header parsers
///
/// An explicit registry owned by the caller, constructed once at startup,
/// instead of ambient global state. The built-in parsers are registered as
/// `"passthrough"` and `"uniprot"`; custom parsers become available after
/// [`register`](Self::register).
///
/// # Example
///
/// ```
/// use fastadb::{HeaderParser, HeaderParserRegistry, ParsedHeader};
///
/// let mut registry = HeaderParserRegistry::builtin();
/// registry.register(
///     "first_word",
///     HeaderParser::Custom(Box::new(|header| {
///         Ok(ParsedHeader {
///             identifier: header.split_whitespace().next().unwrap_or("").to_string(),
///             fields: Vec::new(),
///         })
///     })),
/// );
///
/// assert!(registry.get("uniprot").is_some());
/// assert!(registry.get("first_word").is_some());
/// assert!(registry.get("missing").is_none());
/// ```
#[derive(Debug)]
pub struct HeaderParserRegistry {
    parsers: HashMap<String, HeaderParser>,
}

impl HeaderParserRegistry {
    /// Create a registry with the built-in parsers registered as
    /// `"passthrough"` and `"uniprot"`
    pub fn builtin() -> Self {
        let mut parsers = HashMap::new();
        parsers.insert("passthrough".to_string(), HeaderParser::Passthrough);
        parsers.insert("uniprot".to_string(), HeaderParser::Uniprot);
        Self { parsers }
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    /// Register a parser under a name, replacing any previous registration
    pub fn register(&mut self, name: impl Into<String>, parser: HeaderParser) {
        self.parsers.insert(name.into(), parser);
    }

    /// Get a registered parser by name
    pub fn get(&self, name: &str) -> Option<&HeaderParser> {
        self.parsers.get(name)
    }

    /// Get a registered parser by name, failing with
    /// [`FastaDbError::UnknownParser`] when absent
    pub fn parser(&self, name: &str) -> Result<&HeaderParser> {
        self.get(name)
            .ok_or_else(|| FastaDbError::UnknownParser(name.to_string()))
    }
}

impl Default for HeaderParserRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
