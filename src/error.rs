//! Error types for fastadb

use std::fmt;

/// Result type alias for fastadb operations
pub type Result<T> = std::result::Result<T, FastaDbError>;

/// Error types that can occur in fastadb
#[derive(Debug)]
pub enum FastaDbError {
    /// I/O error, propagated from the underlying read/write primitives
    Io(std::io::Error),

    /// A header could not be parsed by a custom header parser.
    ///
    /// Built-in parsers never produce this error; they degrade to
    /// best-effort extraction instead.
    MalformedHeader {
        /// Name of the parser that rejected the header
        parser: String,
        /// The offending header line, without the leading '>'
        header: String,
    },

    /// An imported record carries an identifier that is already present
    DuplicateIdentifier {
        /// The colliding identifier
        identifier: String,
        /// Name of the FASTA source the colliding record came from
        source: String,
    },

    /// Lookup or removal of an identifier that is not in the database
    IdentifierNotFound(String),

    /// A header parser name that is not registered
    UnknownParser(String),
}

impl fmt::Display for FastaDbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FastaDbError::Io(err) => write!(f, "I/O error: {err}"),
            FastaDbError::MalformedHeader { parser, header } => write!(
                f,
                "header could not be parsed with the '{parser}' parser: '{header}'"
            ),
            FastaDbError::DuplicateIdentifier { identifier, source } => write!(
                f,
                "identifier '{identifier}' from '{source}' already in database"
            ),
            FastaDbError::IdentifierNotFound(identifier) => {
                write!(f, "identifier '{identifier}' not found in database")
            }
            FastaDbError::UnknownParser(name) => {
                write!(f, "no header parser registered under the name '{name}'")
            }
        }
    }
}

impl std::error::Error for FastaDbError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FastaDbError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FastaDbError {
    fn from(err: std::io::Error) -> Self {
        FastaDbError::Io(err)
    }
}
