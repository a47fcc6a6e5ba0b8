//! Core error types for diagram parsing
//!
//! Every variant is fatal for the whole parse: there is no partial-result
//! recovery path, and callers never receive a half-built registry.

use thiserror::Error;

/// Errors produced while lexing or parsing a diagram
#[derive(Error, Debug)]
pub enum PumlError {
    #[error("Lexical error: cannot classify {found:?} at line {line}, column {column}")]
    Lex {
        found: String,
        line: usize,
        column: usize,
    },

    #[error("Unexpected token: expected {expected}, found {found:?}")]
    UnexpectedToken { expected: String, found: String },

    #[error("Unresolved reference: no declared entity named {name:?}")]
    UnresolvedReference { name: String },

    #[error("Unsupported relation: arrow {arrow:?} is recognized but not implemented")]
    UnsupportedRelation { arrow: String },

    #[error("Expansion depth exceeded while serializing {name:?} (relation cycle?)")]
    ExpansionDepth { name: String },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl PumlError {
    /// Create a new lexical error
    pub fn lex(found: impl Into<String>, line: usize, column: usize) -> Self {
        Self::Lex {
            found: found.into(),
            line,
            column,
        }
    }

    /// Create a new unexpected-token error
    pub fn unexpected(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a new resolution error
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self::UnresolvedReference { name: name.into() }
    }

    /// Create a new unsupported-relation error
    pub fn unsupported(arrow: impl Into<String>) -> Self {
        Self::UnsupportedRelation {
            arrow: arrow.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_error() {
        let error = PumlError::lex("$", 3, 7);
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Lexical error"));
        assert!(error_msg.contains("line 3"));
        assert!(error_msg.contains("column 7"));
    }

    #[test]
    fn test_unexpected_token_error() {
        let error = PumlError::unexpected("element value", "open brace");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Unexpected token"));
        assert!(error_msg.contains("element value"));
    }

    #[test]
    fn test_unresolved_reference_error() {
        let error = PumlError::unresolved("Ghost");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Unresolved reference"));
        assert!(error_msg.contains("Ghost"));
    }

    #[test]
    fn test_unsupported_relation_error() {
        let error = PumlError::unsupported("-->");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Unsupported relation"));
        assert!(error_msg.contains("-->"));
    }

    #[test]
    fn test_io_error_conversion() {
        use std::io;
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: PumlError = io_err.into();
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("IO error"));
        assert!(error_msg.contains("File not found"));
    }
}
