//! I/O module: streaming FASTA parsing, serialization, and compression
//!
//! The parser and writer are duals: [`FastaStream`] turns FASTA text into
//! records, [`FastaWriter`] turns records back into FASTA text. Both go
//! through the [`compression`] layer, which picks gzip transparently from
//! file extensions.

pub mod compression;
mod parser;
pub mod sink;
mod writer;

pub use compression::{CompressedWriter, DataSource};
pub use parser::{FastaStream, Records};
pub use sink::DataSink;
pub use writer::{FastaWriter, DEFAULT_LINE_WIDTH};
