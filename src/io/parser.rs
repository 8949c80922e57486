//! Streaming FASTA parser
//!
//! # Format
//!
//! FASTA format consists of:
//! - Header line starting with '>' followed by free-form or UniProt-style text
//! - Zero or more sequence lines (can be wrapped)
//!
//! Example:
//! ```text
//! >sp|O75385|ULK1_HUMAN Serine/threonine-protein kinase ULK1 OS=Homo sapiens
//! MEPGRGGTET
//! VGKFEFSRKD
//! >sequence2
//! MAAAR
//! ```
//!
//! # Structural tolerance
//!
//! The parser never fails on malformed structure, only on I/O errors:
//!
//! - content before the first '>' line is skipped;
//! - blank lines inside a sequence block contribute nothing;
//! - both `\n` and `\r\n` line terminators are accepted and stripped;
//! - a header with no sequence lines yields a record with an empty sequence;
//! - input with no '>' line at all yields an empty iterator.
//!
//! This matches the intended use on messy real-world FASTA files, where
//! structural strictness would make whole databases unreadable.

use crate::error::Result;
use crate::header::HeaderParser;
use crate::io::compression::DataSource;
use crate::types::{FastaRecord, RawRecord};
use std::io::BufRead;
use std::path::Path;

/// Lazy FASTA parser yielding one [`RawRecord`] per '>'-prefixed entry
///
/// Sequence lines are trimmed per line and concatenated without separators.
/// The header is preserved verbatim apart from the leading '>' and
/// surrounding whitespace, so re-serialization is lossless.
///
/// # Example
///
/// ```no_run
/// use fastadb::io::FastaStream;
///
/// # fn main() -> fastadb::Result<()> {
/// let stream = FastaStream::from_path("proteins.fasta.gz")?;
/// for record in stream {
///     let record = record?;
///     println!("{}: {} residues", record.header, record.sequence.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct FastaStream<R: BufRead> {
    reader: R,
    line_buffer: String,
    finished: bool,
    /// Peek buffer holding the header of the next record once seen
    pending_header: Option<String>,
}

impl FastaStream<Box<dyn BufRead + Send>> {
    /// Create a FASTA stream from a data source
    pub fn new(source: DataSource) -> Result<Self> {
        Ok(Self::from_reader(source.open()?))
    }

    /// Create a FASTA stream from a local file path
    ///
    /// Gzip-compressed files are decompressed transparently based on the
    /// file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(DataSource::from_path(path))
    }
}

impl<R: BufRead> FastaStream<R> {
    /// Create a FASTA stream from any buffered reader
    ///
    /// This is useful for testing or reading from in-memory sources.
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            line_buffer: String::with_capacity(256),
            finished: false,
            pending_header: None,
        }
    }

    /// Apply a header parser to each raw record, yielding [`FastaRecord`]s
    pub fn records(self, parser: &HeaderParser) -> Records<'_, R> {
        Records {
            stream: self,
            parser,
        }
    }

    /// Read a single raw record
    fn read_record(&mut self) -> Result<Option<RawRecord>> {
        if self.finished {
            return Ok(None);
        }

        // Find the next header: either the one peeked while reading the
        // previous record, or scan forward skipping leading content.
        let header = match self.pending_header.take() {
            Some(header) => header,
            None => loop {
                self.line_buffer.clear();
                if self.reader.read_line(&mut self.line_buffer)? == 0 {
                    self.finished = true;
                    return Ok(None);
                }
                let line = self.line_buffer.trim();
                if let Some(header) = line.strip_prefix('>') {
                    break header.to_string();
                }
                // Content before the first '>' is not an error, just skipped.
            },
        };

        // Concatenate sequence lines until the next header or EOF
        let mut sequence = String::new();
        loop {
            self.line_buffer.clear();
            if self.reader.read_line(&mut self.line_buffer)? == 0 {
                self.finished = true;
                break;
            }
            let line = self.line_buffer.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(next_header) = line.strip_prefix('>') {
                self.pending_header = Some(next_header.to_string());
                break;
            }
            sequence.push_str(line);
        }

        Ok(Some(RawRecord { header, sequence }))
    }
}

impl<R: BufRead> Iterator for FastaStream<R> {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Iterator adapter pairing a [`FastaStream`] with a [`HeaderParser`]
///
/// Yields one [`FastaRecord`] per raw record. Errors come from I/O or, for
/// custom header parsers, from header parsing; the built-in parsers never
/// fail.
pub struct Records<'a, R: BufRead> {
    stream: FastaStream<R>,
    parser: &'a HeaderParser,
}

impl<R: BufRead> Iterator for Records<'_, R> {
    type Item = Result<FastaRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw = match self.stream.next()? {
            Ok(raw) => raw,
            Err(e) => return Some(Err(e)),
        };
        let parsed = match self.parser.parse(&raw.header) {
            Ok(parsed) => parsed,
            Err(e) => return Some(Err(e)),
        };
        Some(Ok(FastaRecord::new(
            parsed.identifier,
            raw.header,
            raw.sequence,
            parsed.fields,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor};

    fn parse(fasta: &str) -> Vec<RawRecord> {
        FastaStream::from_reader(BufReader::new(Cursor::new(fasta.as_bytes())))
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_parse_single_record() {
        let records = parse(">seq1\nPEPTIDE\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].header, "seq1");
        assert_eq!(records[0].sequence, "PEPTIDE");
    }

    #[test]
    fn test_parse_multiple_records() {
        let records = parse(">seq1\nMKKK\n>seq2\nMAAA\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].header, "seq1");
        assert_eq!(records[0].sequence, "MKKK");
        assert_eq!(records[1].header, "seq2");
        assert_eq!(records[1].sequence, "MAAA");
    }

    #[test]
    fn test_parse_multiline_sequence() {
        let records = parse(">seq1\nMKKK\nRRR\n>seq2\nMAAA\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sequence, "MKKKRRR");
    }

    #[test]
    fn test_header_preserved_verbatim() {
        let records = parse(">sp|P12345|TEST_HUMAN some description GN=FOO\nMKKK\n");
        assert_eq!(
            records[0].header,
            "sp|P12345|TEST_HUMAN some description GN=FOO"
        );
    }

    #[test]
    fn test_crlf_line_terminators() {
        let records = parse(">seq1\r\nMKKK\r\nRRR\r\n");
        assert_eq!(records[0].header, "seq1");
        assert_eq!(records[0].sequence, "MKKKRRR");
    }

    #[test]
    fn test_blank_lines_ignored() {
        let records = parse(">seq1\n\nMKKK\n\n\nRRR\n\n>seq2\nMAAA\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sequence, "MKKKRRR");
        assert_eq!(records[1].sequence, "MAAA");
    }

    #[test]
    fn test_leading_content_skipped() {
        let records = parse("; comment line\nstray sequence text\n>seq1\nMKKK\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].header, "seq1");
        assert_eq!(records[0].sequence, "MKKK");
    }

    #[test]
    fn test_no_records_without_headers() {
        assert!(parse("just some text\nno fasta here\n").is_empty());
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_header_only_record_has_empty_sequence() {
        let records = parse(">seq1\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sequence, "");
    }

    #[test]
    fn test_consecutive_headers() {
        let records = parse(">seq1\n>seq2\nMAAA\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].header, "seq1");
        assert_eq!(records[0].sequence, "");
        assert_eq!(records[1].sequence, "MAAA");
    }

    #[test]
    fn test_records_adapter_with_uniprot_parser() {
        let fasta = ">sp|P12345|TEST_HUMAN desc OS=Homo sapiens GN=FOO\nMKKK\n";
        let stream = FastaStream::from_reader(BufReader::new(Cursor::new(fasta.as_bytes())));
        let records: Vec<FastaRecord> = stream
            .records(&HeaderParser::Uniprot)
            .collect::<Result<Vec<_>>>()
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].identifier, "P12345");
        assert_eq!(records[0].header, "sp|P12345|TEST_HUMAN desc OS=Homo sapiens GN=FOO");
        assert_eq!(records[0].sequence, "MKKK");
        assert_eq!(records[0].field("gene_name"), Some("FOO"));
    }

    // Property-based tests
    use proptest::prelude::*;

    proptest! {
        /// Leading non-'>' content never changes the parsed records
        #[test]
        fn test_leading_garbage_is_transparent(
            garbage in r"[a-zA-Z0-9 ;#]{0,40}(\n[a-zA-Z0-9 ;#]{0,40}){0,3}",
            seq in "[ACDEFGHIKLMNPQRSTVWY]{1,80}",
        ) {
            let clean = format!(">seq1\n{seq}\n");
            let dirty = format!("{garbage}\n{clean}");
            prop_assert_eq!(parse(&clean), parse(&dirty));
        }

        /// Structural parsing never fails on arbitrary printable input
        #[test]
        fn test_parser_never_fails_on_garbage(input in r"[ -~\n]{0,200}") {
            let stream = FastaStream::from_reader(BufReader::new(Cursor::new(input.as_bytes())));
            prop_assert!(stream.collect::<Result<Vec<_>>>().is_ok());
        }

        /// Sequence line wrapping is invisible to the parser
        #[test]
        fn test_wrapping_is_invisible(
            seq in "[ACDEFGHIKLMNPQRSTVWY]{10,120}",
            width in 1..40usize,
        ) {
            let mut wrapped = String::from(">seq1\n");
            for chunk in seq.as_bytes().chunks(width) {
                wrapped.push_str(std::str::from_utf8(chunk).unwrap());
                wrapped.push('\n');
            }
            let records = parse(&wrapped);
            prop_assert_eq!(records.len(), 1);
            prop_assert_eq!(&records[0].sequence, &seq);
        }
    }
}
