//! rs3 format implementation
//!
//! Data Model:
//!
//!     rs3 is the XML exchange format written by RSTTool and rstWeb. It does not nest: the body
//!     is a flat list of `<segment>` and `<group>` records, each naming its parent by id and its
//!     relation to that parent by `relname`. A header block declares every relation name as
//!     either `rst` (mononuclear) or `multinuc`.
//!
//!     | rs3                                   | Canonical tree                          |
//!     | segment                               | leaf (the EDU text)                     |
//!     | group type="span"                     | passes its single nucleus through       |
//!     | group type="multinuc"                 | relation node, one N per nucleus        |
//!     | relname="span" (or absent)            | the nucleus of its parent               |
//!     | relname=<rst relation>                | a satellite of its parent               |
//!
//!     Reading is split in two: the XML layer here produces a [`FlatGraph`], and
//!     [`crate::mappings::graph_to_tree`] does the structural work. Writing mirrors it.
//!
//! Library
//!
//!     quick-xml's pull reader handles the XML itself (entities, CDATA, attribute quoting).
//!     The writer is hand-rolled, like the tag serializer it replaces: output has to be
//!     byte-stable and the document shape is fixed.
//!
//! [`FlatGraph`]: crate::ir::FlatGraph

pub mod parser;
pub mod serializer;

use rst_parser::rst::ast::DiscourseTree;

use crate::error::FormatError;
use crate::format::{Format, RenderOptions};
use crate::mappings::{graph_to_tree, tree_to_graph};

pub use parser::parse_rs3;
pub use serializer::serialize_rs3;

/// Format implementation for rs3 XML
pub struct Rs3Format;

impl Format for Rs3Format {
    fn name(&self) -> &str {
        "rs3"
    }

    fn description(&self) -> &str {
        "RSTTool / rstWeb XML exchange format"
    }

    fn file_extensions(&self) -> &[&str] {
        &["rs3"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<DiscourseTree, FormatError> {
        parse_rs3(source)
            .and_then(|graph| graph_to_tree(&graph))
            .map_err(|err| FormatError::new(self.name(), err))
    }

    fn serialize(
        &self,
        tree: &DiscourseTree,
        options: &RenderOptions,
    ) -> Result<String, FormatError> {
        let graph = tree_to_graph(tree).map_err(|err| FormatError::new(self.name(), err))?;
        Ok(serialize_rs3(&graph, options))
    }
}
