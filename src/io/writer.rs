//! FASTA writer with configurable header formatting and line wrapping
//!
//! The writer is the dual of the parser: with the default
//! [`HeaderFormat::Verbatim`] and any line width, writing parsed records
//! back reproduces the original header text and sequence content exactly
//! (modulo re-wrapping of sequence lines).

use crate::error::Result;
use crate::header::HeaderFormat;
use crate::io::compression::CompressedWriter;
use crate::io::sink::DataSink;
use crate::types::FastaRecord;
use std::io::Write;
use std::path::Path;

/// Default number of sequence characters per line
///
/// 60 characters per line is the layout UniProt distributes its FASTA
/// releases in.
pub const DEFAULT_LINE_WIDTH: usize = 60;

/// FASTA serializer over any `Write` destination
///
/// # Line wrapping
///
/// Sequences are wrapped to [`line_width`](Self::with_line_width) characters
/// per line (default 60). A width of `0` disables wrapping and emits the
/// whole sequence on a single line. Wrapping applies to sequences only; the
/// header formatter output is emitted as-is and must not contain line
/// terminators.
///
/// # Example
///
/// ```no_run
/// use fastadb::io::FastaWriter;
/// use fastadb::{FastaRecord, HeaderFormat};
///
/// # fn main() -> fastadb::Result<()> {
/// let mut writer = FastaWriter::create("output.fasta.gz")?.with_line_width(80);
///
/// let record = FastaRecord::new(
///     "P12345".to_string(),
///     "sp|P12345|TEST_HUMAN Test protein".to_string(),
///     "MKTAYIAKQR".to_string(),
///     Vec::new(),
/// );
///
/// writer.write_record(&record, &HeaderFormat::Verbatim)?;
/// writer.finish()?;
/// # Ok(())
/// # }
/// ```
pub struct FastaWriter<W: Write> {
    writer: W,
    line_width: usize,
    records_written: usize,
}

impl FastaWriter<CompressedWriter> {
    /// Create a FASTA writer for a data sink
    ///
    /// Gzip compression is auto-detected from the sink's file extension.
    pub fn new(sink: DataSink) -> Result<Self> {
        Ok(Self::from_writer(CompressedWriter::new(&sink)?))
    }

    /// Create a FASTA writer to a file path, truncating an existing file
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(DataSink::from_path(path))
    }

    /// Create a FASTA writer that appends to an existing file
    pub fn append<P: AsRef<Path>>(path: P) -> Result<Self> {
        let sink = DataSink::from_path(path);
        Ok(Self::from_writer(CompressedWriter::with_append(&sink, true)?))
    }

    /// Create a FASTA writer to standard output
    pub fn stdout() -> Result<Self> {
        Self::new(DataSink::stdout())
    }

    /// Finish writing: flush all buffers and finalize the compression
    /// stream
    ///
    /// Must be called on compressed sinks; without it the gzip trailer is
    /// never written.
    pub fn finish(self) -> Result<()> {
        self.writer.finish()?;
        Ok(())
    }
}

impl<W: Write> FastaWriter<W> {
    /// Create a FASTA writer over any `Write` destination
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer,
            line_width: DEFAULT_LINE_WIDTH,
            records_written: 0,
        }
    }

    /// Set the sequence line width; `0` disables wrapping
    pub fn with_line_width(mut self, width: usize) -> Self {
        self.line_width = width;
        self
    }

    /// Write a single record
    ///
    /// Emits `>` followed by the formatted header on one line, then the
    /// wrapped sequence. Each line ends with exactly one terminator; records
    /// with an empty sequence produce only the header line.
    pub fn write_record(&mut self, record: &FastaRecord, format: &HeaderFormat) -> Result<()> {
        writeln!(self.writer, ">{}", format.format(record))?;

        if !record.sequence.is_empty() {
            if self.line_width == 0 {
                writeln!(self.writer, "{}", record.sequence)?;
            } else {
                for chunk in record.sequence.as_bytes().chunks(self.line_width) {
                    self.writer.write_all(chunk)?;
                    self.writer.write_all(b"\n")?;
                }
            }
        }

        self.records_written += 1;
        Ok(())
    }

    /// Write every record from an iterator, in iteration order
    pub fn write_all_records<'a, I>(&mut self, records: I, format: &HeaderFormat) -> Result<()>
    where
        I: IntoIterator<Item = &'a FastaRecord>,
    {
        for record in records {
            self.write_record(record, format)?;
        }
        Ok(())
    }

    /// Get the number of records written so far
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush buffered data to the destination
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
