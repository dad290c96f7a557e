//! Fatal errors.
//!
//! Only two things stop a parse: XML that the tokenizer rejects, and input
//! that cannot be opened or read. Everything else degrades gracefully and is
//! reported through [`Diagnostic`](crate::Diagnostic)s instead.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for kml-lite operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that terminate a parse.
#[derive(Debug, Error)]
pub enum Error {
    /// The input is not well-formed XML.
    #[error("XML syntax error at byte {position}: {message}")]
    XmlSyntax {
        message: String,
        /// Byte offset where the tokenizer gave up.
        position: u64,
    },

    /// The input file could not be opened.
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading the input failed part way through.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Convert a tokenizer error, keeping I/O failures distinct from syntax errors.
    pub(crate) fn from_xml(err: quick_xml::Error, position: u64) -> Self {
        match err {
            quick_xml::Error::Io(io_err) => {
                Error::Io(io::Error::new(io_err.kind(), io_err.to_string()))
            }
            other => Error::XmlSyntax {
                message: other.to_string(),
                position,
            },
        }
    }

    /// Byte offset of a syntax error, if this is one.
    pub fn position(&self) -> Option<u64> {
        match self {
            Error::XmlSyntax { position, .. } => Some(*position),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display() {
        let err = Error::XmlSyntax {
            message: "bad tag".to_string(),
            position: 12,
        };
        assert_eq!(err.to_string(), "XML syntax error at byte 12: bad tag");
        assert_eq!(err.position(), Some(12));
    }

    #[test]
    fn test_open_error_display() {
        let err = Error::Open {
            path: PathBuf::from("missing.kml"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "cannot open missing.kml: not found");
        assert_eq!(err.position(), None);
    }
}
