//! Transparent gzip support for FASTA sources and destinations
//!
//! Protein FASTA files from UniProt and similar resources are commonly
//! distributed gzip-compressed. This module selects the right codec from the
//! file extension so the parser and writer never have to care: a
//! [`DataSource`] opens into a plain `BufRead`, a [`CompressedWriter`] is a
//! plain `Write` that finalizes its gzip stream on [`finish`].
//!
//! [`finish`]: CompressedWriter::finish

use crate::error::Result;
use crate::io::sink::DataSink;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Input source for FASTA parsing
///
/// Gzip is auto-detected from the `.gz`, `.gzip` and `.bgz` extensions.
/// Multi-member gzip files (such as those produced by appending) are
/// decoded in full.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Local file path
    Local(PathBuf),
}

impl DataSource {
    /// Create a local file data source
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        DataSource::Local(path.as_ref().to_path_buf())
    }

    fn is_compressed(&self) -> bool {
        let DataSource::Local(path) = self;
        matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("gz") | Some("gzip") | Some("bgz")
        )
    }

    /// Open the source and return a buffered reader over decompressed text
    pub fn open(&self) -> Result<Box<dyn BufRead + Send>> {
        let DataSource::Local(path) = self;
        let file = File::open(path)?;
        if self.is_compressed() {
            let decoder = MultiGzDecoder::new(BufReader::new(file));
            Ok(Box::new(BufReader::new(decoder)))
        } else {
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

/// A write destination with optional gzip compression
///
/// Created from a [`DataSink`]; the compression codec follows the sink's
/// file extension. [`finish`](Self::finish) must be called to flush buffers
/// and finalize the gzip trailer on compressed output.
pub enum CompressedWriter {
    /// Uncompressed local file
    Plain(BufWriter<File>),
    /// Gzip-compressed local file
    Gzip(GzEncoder<BufWriter<File>>),
    /// Standard output
    Stdout(BufWriter<io::Stdout>),
}

fn open_file(path: &Path, append: bool) -> io::Result<File> {
    if append {
        OpenOptions::new().create(true).append(true).open(path)
    } else {
        File::create(path)
    }
}

impl CompressedWriter {
    /// Create a writer for the given sink, truncating existing files
    pub fn new(sink: &DataSink) -> io::Result<Self> {
        Self::with_append(sink, false)
    }

    /// Create a writer for the given sink
    ///
    /// With `append` set, output is appended to an existing file. Appending
    /// to a gzip sink starts a new gzip member, which decoders read back as
    /// one continuous stream.
    pub fn with_append(sink: &DataSink, append: bool) -> io::Result<Self> {
        match sink {
            DataSink::Local(path) => {
                let file = BufWriter::new(open_file(path, append)?);
                if sink.is_compressed() {
                    Ok(Self::Gzip(GzEncoder::new(file, Compression::default())))
                } else {
                    Ok(Self::Plain(file))
                }
            }
            DataSink::Stdout => Ok(Self::Stdout(BufWriter::new(io::stdout()))),
        }
    }

    /// Finalize the stream: flush buffers and write the gzip trailer
    pub fn finish(self) -> io::Result<()> {
        match self {
            Self::Plain(mut writer) => writer.flush(),
            Self::Gzip(encoder) => encoder.finish()?.flush(),
            Self::Stdout(mut writer) => writer.flush(),
        }
    }
}

impl Write for CompressedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(writer) => writer.write(buf),
            Self::Gzip(encoder) => encoder.write(buf),
            Self::Stdout(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(writer) => writer.flush(),
            Self::Gzip(encoder) => encoder.flush(),
            Self::Stdout(writer) => writer.flush(),
        }
    }
}
