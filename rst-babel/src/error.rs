//! Format errors
//!
//!     The structured failure handed back to the calling layer: which format was involved,
//!     which file (if the caller knows it), and the underlying [`ConversionError`]. The error
//!     kind is what callers map to exit or status codes.

use std::path::{Path, PathBuf};

use rst_parser::rst::error::{ConversionError, ErrorKind};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}{source}", describe_context(.format, .path))]
pub struct FormatError {
    /// Name of the format being read or written; empty when no format was resolved.
    pub format: String,
    pub path: Option<PathBuf>,
    #[source]
    pub source: ConversionError,
}

impl FormatError {
    pub fn new(format: impl Into<String>, source: ConversionError) -> Self {
        Self {
            format: format.into(),
            path: None,
            source,
        }
    }

    /// An identifier outside the registered set.
    pub fn unknown_format(name: &str) -> Self {
        Self::new("", ConversionError::UnknownFormat(name.to_string()))
    }

    pub fn not_supported(format: &str, direction: &str) -> Self {
        Self::new(
            format,
            ConversionError::unsupported(format!(
                "format '{}' does not support {}",
                format, direction
            )),
        )
    }

    /// Attach the file being converted.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }

    pub fn message(&self) -> String {
        self.source.to_string()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

fn describe_context(format: &str, path: &Option<PathBuf>) -> String {
    match (format.is_empty(), path) {
        (true, None) => String::new(),
        (true, Some(path)) => format!("{}: ", path.display()),
        (false, None) => format!("{}: ", format),
        (false, Some(path)) => format!("{} ({}): ", path.display(), format),
    }
}
