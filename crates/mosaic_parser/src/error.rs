//! Error types for floorplan input parsing.

/// Errors that abort parsing of a `.block` or `.nets` file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// An I/O error occurred while reading the input file.
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// A line has the wrong number of fields for its kind.
    #[error("malformed line {line}: '{text}'")]
    MalformedLine {
        /// 1-based line number.
        line: usize,
        /// The offending line, trimmed.
        text: String,
    },

    /// A field that should be an integer could not be parsed.
    #[error("invalid number '{token}' on line {line}")]
    InvalidNumber {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// The `.block` file never declared an `Outline:` header.
    #[error("block file is missing the Outline header")]
    MissingOutline,
}
