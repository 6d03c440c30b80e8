//! Format trait definition
//!
//! This module defines the core Format trait that all format implementations must implement.
//! The trait provides a uniform interface for reading and writing discourse trees.

use rst_parser::rst::ast::DiscourseTree;

use crate::error::FormatError;

/// Rendering parameters handed to every writer.
///
/// Writers never read global state: everything that changes how bytes come out is passed
/// explicitly through this struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces per nesting level in the XML exchange format.
    pub indent_width: usize,
    /// Whether the XML exchange format starts with an `<?xml …?>` declaration.
    pub xml_declaration: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            xml_declaration: true,
        }
    }
}

/// Trait for discourse formats
///
/// Implementors convert between a textual representation and the canonical
/// [`DiscourseTree`]. Formats can support parsing, serialization, or both.
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn supports_parsing(&self) -> bool {
///         true
///     }
///
///     fn parse(&self, source: &str) -> Result<DiscourseTree, FormatError> {
///         // Read source into the canonical tree
///         todo!()
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The identifier of this format (e.g., "rs3", "dis")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions conventionally used for this format
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → tree)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (tree → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a discourse tree
    ///
    /// Default implementation returns an unsupported-conversion error.
    fn parse(&self, _source: &str) -> Result<DiscourseTree, FormatError> {
        Err(FormatError::not_supported(self.name(), "parsing"))
    }

    /// Serialize a discourse tree into source text
    ///
    /// Default implementation returns an unsupported-conversion error.
    fn serialize(
        &self,
        _tree: &DiscourseTree,
        _options: &RenderOptions,
    ) -> Result<String, FormatError> {
        Err(FormatError::not_supported(self.name(), "serialization"))
    }
}
