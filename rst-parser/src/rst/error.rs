//! Error types for reading, building and writing discourse trees
//!
//!     Every failure of a conversion is terminal and is detected before any output byte is
//!     produced. Callers map the [`ErrorKind`] to their own presentation (exit code, status
//!     code).

use std::fmt;

use thiserror::Error;

use super::ast::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// Unbalanced delimiters, unknown node-type tokens, or records breaking a format rule.
    #[error("malformed input: {message}{}", describe_offset(.offset))]
    MalformedInput {
        message: String,
        offset: Option<usize>,
    },

    /// A format identifier outside the registered set.
    #[error("unknown format '{0}'")]
    UnknownFormat(String),

    /// A parent id references no record.
    #[error("node {node} references parent {parent}, which does not exist")]
    DisconnectedGraph { node: NodeId, parent: NodeId },

    /// The parent chain of a node never reaches the root.
    #[error("the parent chain of node {node} does not reach a root")]
    CyclicGraph { node: NodeId },

    /// The target format can not represent the tree.
    #[error("unsupported conversion: {message}")]
    UnsupportedConversion { message: String },
}

impl ConversionError {
    pub fn malformed(message: impl Into<String>) -> Self {
        ConversionError::MalformedInput {
            message: message.into(),
            offset: None,
        }
    }

    pub fn malformed_at(message: impl Into<String>, offset: usize) -> Self {
        ConversionError::MalformedInput {
            message: message.into(),
            offset: Some(offset),
        }
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        ConversionError::UnsupportedConversion {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ConversionError::MalformedInput { .. } => ErrorKind::MalformedInput,
            ConversionError::UnknownFormat(_) => ErrorKind::UnknownFormat,
            ConversionError::DisconnectedGraph { .. } => ErrorKind::DisconnectedGraph,
            ConversionError::CyclicGraph { .. } => ErrorKind::CyclicGraph,
            ConversionError::UnsupportedConversion { .. } => ErrorKind::UnsupportedConversion,
        }
    }
}

fn describe_offset(offset: &Option<usize>) -> String {
    offset
        .map(|o| format!(" (at byte {})", o))
        .unwrap_or_default()
}

/// Discriminant of [`ConversionError`], for callers that only need the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedInput,
    UnknownFormat,
    DisconnectedGraph,
    CyclicGraph,
    UnsupportedConversion,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::MalformedInput => "MalformedInputError",
            ErrorKind::UnknownFormat => "UnknownFormatError",
            ErrorKind::DisconnectedGraph => "DisconnectedGraphError",
            ErrorKind::CyclicGraph => "CyclicGraphError",
            ErrorKind::UnsupportedConversion => "UnsupportedConversionError",
        };
        f.write_str(name)
    }
}

/// Result alias used across the crate.
pub type ConversionResult<T> = Result<T, ConversionError>;
