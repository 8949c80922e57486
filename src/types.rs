//! Common types used throughout fastadb

/// Ordered header fields as name/value pairs.
///
/// Field order matches the order of extraction from the header line, so
/// re-serialization can reproduce the original field layout.
pub type HeaderFields = Vec<(String, String)>;

/// A structural FASTA record, before header parsing.
///
/// This is what the streaming parser yields: the raw header line (without
/// the leading '>') and the concatenated sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Header line content after '>', trailing line terminator stripped
    pub header: String,
    /// Concatenated sequence with all internal line breaks removed
    pub sequence: String,
}

/// A protein record derived from one FASTA entry.
///
/// Records are immutable after construction: there are no mutating methods,
/// and any modification requires building a replacement record.
///
/// # Invariants
///
/// - `identifier`, `header` and `sequence` are always present. A header-only
///   entry yields an empty `sequence`, never a missing one.
/// - `header` preserves the raw header line verbatim (minus the leading '>'
///   and trailing line terminator), regardless of what the header parser
///   extracted. This is what makes verbatim re-serialization lossless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    /// Unique identifier used for database lookup
    pub identifier: String,
    /// The full raw header line, not containing the starting '>' character
    pub header: String,
    /// The amino acid sequence, internal line breaks removed
    pub sequence: String,
    /// Header fields extracted by the header parser; may be empty
    pub header_fields: HeaderFields,
}

impl FastaRecord {
    /// Create a new FASTA record
    pub fn new(
        identifier: String,
        header: String,
        sequence: String,
        header_fields: HeaderFields,
    ) -> Self {
        Self {
            identifier,
            header,
            sequence,
            header_fields,
        }
    }

    /// Look up a parsed header field by name
    ///
    /// # Examples
    ///
    /// ```
    /// use fastadb::{FastaRecord, HeaderParser};
    ///
    /// let parsed = HeaderParser::Uniprot
    ///     .parse("sp|P12345|TEST_HUMAN Test protein GN=FOO")
    ///     .unwrap();
    /// let record = FastaRecord::new(
    ///     parsed.identifier,
    ///     "sp|P12345|TEST_HUMAN Test protein GN=FOO".to_string(),
    ///     "PEPTIDE".to_string(),
    ///     parsed.fields,
    /// );
    /// assert_eq!(record.field("gene_name"), Some("FOO"));
    /// assert_eq!(record.field("missing"), None);
    /// ```
    pub fn field(&self, name: &str) -> Option<&str> {
        self.header_fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Check if the record has an empty sequence
    ///
    /// Returns `true` for header-only entries, which are valid records.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lookup_preserves_order() {
        let record = FastaRecord::new(
            "id1".to_string(),
            "id1 desc".to_string(),
            "MKKK".to_string(),
            vec![
                ("a".to_string(), "first".to_string()),
                ("a".to_string(), "second".to_string()),
            ],
        );
        // First matching field wins
        assert_eq!(record.field("a"), Some("first"));
    }

    #[test]
    fn test_empty_sequence_is_valid() {
        let record = FastaRecord::new(
            "id1".to_string(),
            "id1".to_string(),
            String::new(),
            Vec::new(),
        );
        assert!(record.is_empty());
        assert_eq!(record.sequence, "");
    }
}
