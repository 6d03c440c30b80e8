//! rstlatex format implementation (write only)
//!
//!     Renders trees with the macros of the rst.sty LaTeX package: `\rstsegment` for EDUs,
//!     `\dirrel` for a nucleus with its satellites and `\multirel` for multinuclear
//!     relations.
//!
//!     `\dirrel` takes any number of satellites around one nucleus, while the canonical tree
//!     nests one binary relation per satellite. The writer therefore merges each mononuclear
//!     chain back into a single block before rendering; this is the only writer that needs the
//!     satellite merge.
//!
//!     This is a presentation target: there is no reader.

pub mod serializer;

use rst_parser::rst::ast::DiscourseTree;

use crate::error::FormatError;
use crate::format::{Format, RenderOptions};

pub use serializer::serialize_rstlatex;

/// Format implementation for rst.sty LaTeX output
pub struct RstLatexFormat;

impl Format for RstLatexFormat {
    fn name(&self) -> &str {
        "rstlatex"
    }

    fn description(&self) -> &str {
        "LaTeX using the rst.sty package"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tex"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(
        &self,
        tree: &DiscourseTree,
        _options: &RenderOptions,
    ) -> Result<String, FormatError> {
        serialize_rstlatex(tree).map_err(|err| FormatError::new(self.name(), err))
    }
}
