//! Error types for the cstrvar-core library.
//!
//! Stream failures carry the underlying I/O error; literal and fragment
//! failures carry the position where decoding stopped.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cstrvar operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all cstrvar operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Failed to read from the input stream
    #[error("failed to read input: {source}")]
    Read {
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write to the output stream
    #[error("failed to write output: {source}")]
    Write {
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to open an input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to open
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to create an output file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        /// Path to the file that failed to open
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A string literal could not be decoded
    #[error("invalid string literal at offset {offset}: {details}")]
    InvalidLiteral {
        /// Byte offset into the literal text
        offset: usize,
        /// Detailed description of the issue
        details: String,
    },

    /// A generated fragment does not have the expected shape
    #[error("malformed fragment at line {line}: {details}")]
    MalformedFragment {
        /// One-based line number
        line: usize,
        /// Detailed description of the issue
        details: String,
    },
}

impl Error {
    /// Creates a new input read error
    pub fn read(source: std::io::Error) -> Self {
        Self::Read { source }
    }

    /// Creates a new output write error
    pub fn write(source: std::io::Error) -> Self {
        Self::Write { source }
    }

    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new file write error
    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates a new literal decoding error
    pub fn invalid_literal(offset: usize, details: impl Into<String>) -> Self {
        Self::InvalidLiteral {
            offset,
            details: details.into(),
        }
    }

    /// Creates a new fragment decoding error
    pub fn malformed_fragment(line: usize, details: impl Into<String>) -> Self {
        Self::MalformedFragment {
            line,
            details: details.into(),
        }
    }

    /// Returns true if the output side was closed by the reader
    pub fn is_broken_pipe(&self) -> bool {
        match self {
            Self::Write { source } | Self::FileWrite { source, .. } => {
                source.kind() == std::io::ErrorKind::BrokenPipe
            }
            _ => false,
        }
    }
}
